use pipeline::{
    outline_confidence, post_confidence, reading_time_minutes, word_count, AngleId,
    BlogPostSection, ContentAngle, OutlineDraft, OutlineSection,
};
use proptest::prelude::*;

fn angle_strategy() -> impl Strategy<Value = ContentAngle> {
    (".{0,40}", ".{0,200}", "[a-zA-Z ,]{0,60}").prop_map(|(title, description, keywords)| {
        ContentAngle {
            id: AngleId::new("a").unwrap(),
            title,
            description,
            keywords,
        }
    })
}

fn section_strategy() -> impl Strategy<Value = OutlineSection> {
    let key_points = prop::collection::vec(".{0,30}", 0..4);
    (".{0,80}", ".{0,2000}", key_points).prop_map(|(title, content, key_points)| OutlineSection {
        title,
        content,
        key_points,
    })
}

proptest! {
    #[test]
    fn outline_confidence_stays_in_unit_interval(
        title in ".{0,200}",
        introduction in section_strategy(),
        body in prop::collection::vec(section_strategy(), 0..8),
        conclusion in section_strategy(),
        angles in prop::collection::vec(angle_strategy(), 0..=10),
    ) {
        let draft = OutlineDraft { title, introduction, body, conclusion };
        let score = outline_confidence(&draft, &angles).as_f64();
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }

    #[test]
    fn post_confidence_stays_in_unit_interval(
        title in ".{0,100}",
        sections in prop::collection::vec(
            (".{0,40}", "[a-z ]{0,2000}", prop::collection::vec("[a-z]{1,10}", 0..3)),
            0..10,
        ),
    ) {
        let sections: Vec<_> = sections
            .into_iter()
            .map(|(t, c, k)| BlogPostSection::new(t, c, k))
            .collect();
        let score = post_confidence(&title, &sections).as_f64();
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }

    #[test]
    fn reading_time_is_ceiling_of_words_over_200(text in "[a-z \n]{0,3000}") {
        let words = word_count(&text);
        let minutes = reading_time_minutes(words);
        prop_assert!(minutes * 200 >= words);
        prop_assert!(minutes == 0 || (minutes - 1) * 200 < words);
    }
}
