#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tradelog::libs::card::{escape_xml, wrap_text, Palette, SummaryCard, CARD_WIDTH};
    use tradelog::libs::job::Job;
    use uuid::Uuid;

    fn sample_job() -> Job {
        Job {
            id: Uuid::new_v4(),
            client_name: "John  Smith".to_string(),
            address: "4 Mill Lane".to_string(),
            description: "Serviced boiler".to_string(),
            materials: String::new(),
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            time_in: "22:00".to_string(),
            time_out: "02:00".to_string(),
            coordinates: None,
        }
    }

    #[test]
    fn test_card_uses_light_palette() {
        let card = SummaryCard::render(&sample_job());
        assert!(card.svg.contains(Palette::LIGHT.background));
        assert!(card.svg.contains(Palette::LIGHT.title));
        assert_eq!(card.width, CARD_WIDTH);
        assert!(card.height > 0.0);
    }

    #[test]
    fn test_card_contents() {
        let card = SummaryCard::render(&sample_job());
        assert!(card.svg.starts_with("<svg"));
        assert!(card.svg.contains("John  Smith"));
        assert!(card.svg.contains("3/5/2024"));
        assert!(card.svg.contains("4 Mill Lane"));
        assert!(card.svg.contains("22:00 - 02:00 (4 hours)"));
        assert!(card.svg.contains("Work Performed"));
        assert!(card.svg.contains("Serviced boiler"));
    }

    #[test]
    fn test_materials_section_only_when_present() {
        let mut job = sample_job();
        let without = SummaryCard::render(&job);
        assert!(!without.svg.contains("Materials Used"));

        job.materials = "Filter\nGasket".to_string();
        let with = SummaryCard::render(&job);
        assert!(with.svg.contains("Materials Used"));
        assert!(with.svg.contains("Gasket"));
        assert!(with.height > without.height);
    }

    #[test]
    fn test_card_file_name() {
        let card = SummaryCard::render(&sample_job());
        assert_eq!(card.file_name, "John-Smith-2024-03-05.pdf");
    }

    #[test]
    fn test_card_escapes_markup() {
        let mut job = sample_job();
        job.client_name = "Smith & Sons <Ltd>".to_string();
        let card = SummaryCard::render(&job);
        assert!(card.svg.contains("Smith &amp; Sons &lt;Ltd&gt;"));
        assert!(!card.svg.contains("<Ltd>"));
    }

    #[test]
    fn test_long_description_grows_card() {
        let mut job = sample_job();
        let short = SummaryCard::render(&job);
        job.description = "Replaced the radiator valves in every room ".repeat(10);
        let long = SummaryCard::render(&job);
        assert!(long.height > short.height);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a<b>&"c"'d'"#), "a&lt;b&gt;&amp;&quot;c&quot;&apos;d&apos;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_wrap_text_keeps_line_breaks() {
        assert_eq!(wrap_text("one\ntwo", 40), vec!["one", "two"]);
        assert_eq!(wrap_text("one\n\ntwo", 40), vec!["one", "", "two"]);
    }

    #[test]
    fn test_wrap_text_breaks_on_words() {
        assert_eq!(wrap_text("fix the leak now", 8), vec!["fix the", "leak now"]);
    }

    #[test]
    fn test_card_keeps_typed_spacing() {
        let job = Job {
            description: "a    b".to_string(),
            materials: "  2x valve".to_string(),
            ..sample_job()
        };
        let card = SummaryCard::render(&job);
        assert!(card.svg.contains(">a    b<"));
        assert!(card.svg.contains(">  2x valve<"));
    }

    #[test]
    fn test_wrap_text_keeps_spacing() {
        assert_eq!(wrap_text("a    b", 40), vec!["a    b"]);
        assert_eq!(wrap_text("  indented  text", 40), vec!["  indented  text"]);
        assert_eq!(wrap_text("col1\tcol2", 40), vec!["col1\tcol2"]);
    }

    #[test]
    fn test_wrap_text_breaks_only_at_limit() {
        assert_eq!(wrap_text("ab  cd", 6), vec!["ab  cd"]);
        assert_eq!(wrap_text("ab  cd  ef", 6), vec!["ab  cd", "ef"]);
        assert_eq!(wrap_text("ab      cd", 4), vec!["ab", "cd"]);
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("ok abcdefgh", 4), vec!["ok", "abcd", "efgh"]);
    }
}
