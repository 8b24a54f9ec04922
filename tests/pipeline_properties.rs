use proptest::prelude::*;
use pipexec::errors::RunErrorKind;
use pipexec::exec::{ExecConfig, Pipeline};

// Whitespace around pipes is irrelevant to the stage structure.
fn padding() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

proptest! {
    #[test]
    fn test_one_stage_per_segment(
        pads in proptest::collection::vec((padding(), padding()), 1..8)
    ) {
        let cfg = ExecConfig::from_process_env();
        let command = pads
            .iter()
            .map(|(before, after)| format!("{before}true{after}"))
            .collect::<Vec<_>>()
            .join("|");

        let pipeline = Pipeline::parse(&command, &cfg).unwrap();

        prop_assert_eq!(pipeline.len(), pads.len());
        for stage in pipeline.stages() {
            prop_assert_eq!(stage.name.as_str(), "true");
            prop_assert!(stage.args.is_empty());
            prop_assert!(stage.env.is_empty());
        }
    }

    #[test]
    fn test_empty_segment_anywhere_is_dangling(
        count in 1usize..6,
        hole in 0usize..6,
    ) {
        let cfg = ExecConfig::from_process_env();
        let hole = hole % (count + 1);
        let mut segments = vec!["true"; count];
        segments.insert(hole, " ");
        let command = segments.join("|");

        let err = Pipeline::parse(&command, &cfg).unwrap_err();
        prop_assert!(matches!(err.kind(), RunErrorKind::DanglingPipe));
    }

    #[test]
    fn test_plain_words_pass_through_unchanged(
        words in proptest::collection::vec("[a-z0-9_.]{1,10}", 0..6)
    ) {
        let cfg = ExecConfig::from_process_env();
        let command = std::iter::once("echo".to_string())
            .chain(words.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        let pipeline = Pipeline::parse(&command, &cfg).unwrap();

        prop_assert_eq!(&pipeline.stages()[0].args, &words);
    }
}
