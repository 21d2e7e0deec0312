//! Tests for the crossing demo's config handling.

use clap::Parser;

use gw_core::SimConfig;

use crate::Cli;
use crate::setup::{build_config, parse_config};

const CROSSING_TOML: &str = include_str!("../crossing.toml");

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("crossing").chain(args.iter().copied()))
}

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn bundled_toml_is_the_crossing_scenario() {
        assert_eq!(parse_config(CROSSING_TOML).unwrap(), SimConfig::crossing());
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let cfg = parse_config(
            "field_size = 5\nagent_count = 0\nsafe_distance = 1.5\nagents = []\n",
        )
        .unwrap();
        assert_eq!(cfg.move_delay_ms, 100);
        assert_eq!(cfg.seed, 0);
        assert_eq!(cfg.timing, gw_core::Timing::default());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(parse_config("field_size = \"big\"").is_err());
    }

    #[test]
    fn roster_file_replaces_agents() {
        let roster = concat!(env!("CARGO_MANIFEST_DIR"), "/roster.csv");
        let cfg = build_config(&cli(&["--roster", roster])).unwrap();
        assert_eq!(cfg.agent_count, 4);
        assert_eq!(cfg.agents[1].speed, 2);
    }

    #[test]
    fn scatter_uses_seed() {
        let a = build_config(&cli(&["--scatter", "6", "--seed", "11"])).unwrap();
        let b = build_config(&cli(&["--scatter", "6", "--seed", "11"])).unwrap();
        assert_eq!(a.agents.len(), 6);
        assert_eq!(a.seed, 11);
        assert_eq!(a.agents, b.agents);
    }

    #[test]
    fn roster_and_scatter_conflict() {
        let parsed = Cli::try_parse_from(["crossing", "--roster", "r.csv", "--scatter", "3"]);
        assert!(parsed.is_err());
    }
}

#[cfg(test)]
mod args {
    use super::*;

    #[test]
    fn defaults() {
        let c = cli(&[]);
        assert!(c.config.is_none());
        assert!(!c.no_console);
        assert_eq!(c.frame_delay_ms, 0);
        assert_eq!(c.verbose, 0);
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(cli(&["-vv"]).verbose, 2);
    }
}
