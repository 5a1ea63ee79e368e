//! Property tests for AMIE3 argument construction.

use std::path::PathBuf;

use proptest::prelude::*;
use rulemine_amie::{AmieCommand, AmieParameters, Launcher};

fn launcher() -> impl Strategy<Value = Launcher> {
    prop_oneof![
        "[a-z]{1,8}\\.jar".prop_map(|jar| Launcher::jar("java", jar)),
        "/opt/[a-z]{1,8}".prop_map(Launcher::binary),
        "[a-z]{1,8}\\.sh".prop_map(|script| Launcher::interpreted("sh", script)),
    ]
}

fn params() -> impl Strategy<Value = AmieParameters> {
    (0.0f64..1.0, 0.0f64..1.0, 1u32..64, any::<bool>()).prop_map(|(minc, minpca, nc, constants)| {
        AmieParameters::new(minc, minpca, nc, constants).expect("generated values are valid")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn ontology_is_always_last(
        launcher in launcher(),
        params in params(),
        name in "[a-z ]{1,12}\\.ttl",
    ) {
        let ontology = PathBuf::from(name);
        let cmd = AmieCommand::build(&launcher, &params, &ontology);
        prop_assert_eq!(cmd.args().last().map(PathBuf::from), Some(ontology));
    }

    #[test]
    fn flags_follow_a_fixed_order(launcher in launcher(), params in params()) {
        let cmd = AmieCommand::build(&launcher, &params, std::path::Path::new("o.ttl"));
        let args: Vec<String> = cmd.args().iter().map(|a| a.to_string_lossy().into_owned()).collect();
        let flags: Vec<&str> = args.iter().map(String::as_str).filter(|a| a.starts_with('-') && *a != "-jar").collect();

        let mut expected = Vec::new();
        if params.constants_enabled {
            expected.push("-const");
        }
        expected.extend(["-minc", "-minpca", "-nc"]);
        prop_assert_eq!(flags, expected);

        let again = AmieCommand::build(&launcher, &params, std::path::Path::new("o.ttl"));
        prop_assert_eq!(cmd, again);
    }

    #[test]
    fn values_parse_back(params in params()) {
        let args = params.to_args();
        let value_after = |flag: &str| {
            let i = args.iter().position(|a| a == flag).expect("flag present");
            args[i + 1].clone()
        };
        prop_assert_eq!(value_after("-minc").parse::<f64>().ok(), Some(params.min_std_confidence));
        prop_assert_eq!(value_after("-minpca").parse::<f64>().ok(), Some(params.min_pca_confidence));
        prop_assert_eq!(value_after("-nc").parse::<u32>().ok(), Some(params.thread_count));
    }
}
