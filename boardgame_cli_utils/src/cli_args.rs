use structopt::StructOpt;

use boardgame::game_tree_search::Game;
use boardgame_search::{ConfigError, GenericSearch, SearchAlgorithm, SearchConfig, SearchLimits};

#[derive(Debug, StructOpt, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOpts {
    #[structopt(
        short = "A",
        long = "--algorithm",
        help = "minimax|mcts, Minimax/Monte-Carlo Tree Search: algorithm used for the game tree search."
    )]
    pub algorithm: Option<SearchAlgorithm>,

    #[structopt(short = "d", long = "--depth", help = "Minimax: search depth")]
    pub depth: Option<u8>,

    #[structopt(long = "--no-pruning", help = "Minimax: disable alpha-beta pruning")]
    pub no_pruning: bool,

    #[structopt(short = "I", long = "--iterations", help = "MCTS: number of iterations")]
    pub iterations: Option<u32>,

    #[structopt(
        short = "C",
        long = "--exploration",
        help = "MCTS: UCT exploration constant. Higher value promotes wider search, while lower value promotes deeper search."
    )]
    pub exploration: Option<f32>,

    #[structopt(
        long = "--rollout-cutoff",
        help = "MCTS: max steps per playout, the remaining position is scored by its evaluation"
    )]
    pub rollout_cutoff: Option<u32>,

    #[structopt(
        short = "T",
        long = "--time-limit-ms",
        help = "Set time limit per move in milliseconds"
    )]
    pub time_limit_ms: Option<u128>,

    #[structopt(short = "P", long = "--max-positions", help = "Max positions to search")]
    pub max_positions: Option<u64>,

    #[structopt(short = "S", long = "--seed", help = "Random seed for the search")]
    pub seed: Option<u64>,

    #[structopt(short = "D", long = "--debug", help = "Log debug info")]
    pub debug: bool,
}

impl SearchOpts {
    pub fn get_limits(&self) -> Option<SearchLimits> {
        if self.time_limit_ms.is_none() && self.max_positions.is_none() {
            return None;
        }
        Some(SearchLimits {
            max_time_ms: self.time_limit_ms,
            max_positions: self.max_positions,
        })
    }

    /// Build a validated configuration. Options that were not given keep
    /// the `SearchConfig` defaults.
    pub fn to_search_config(&self) -> Result<SearchConfig, ConfigError> {
        let default = SearchConfig::default();
        let config = SearchConfig {
            algorithm: self.algorithm.unwrap_or(default.algorithm),
            depth: self.depth.unwrap_or(default.depth),
            iterations: self.iterations.unwrap_or(default.iterations),
            exploration_constant: self.exploration.unwrap_or(default.exploration_constant),
            rollout_cutoff: self.rollout_cutoff.or(default.rollout_cutoff),
            alpha_beta: !self.no_pruning,
            limits: self.get_limits(),
            seed: self.seed,
            debug: self.debug,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn make_search<G: Game>(&self) -> Result<GenericSearch<G>, ConfigError> {
        Ok(self.to_search_config()?.make_search())
    }
}

#[cfg(test)]
mod tests {
    use boardgame::prelude::*;
    use boardgame_search::GameTreeSearch;

    use super::*;

    fn parse(args: &[&str]) -> SearchOpts {
        SearchOpts::from_iter(std::iter::once("search").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_flags_gives_default_config() {
        let opts = parse(&[]);
        assert_eq!(SearchOpts::default(), opts);
        assert_eq!(Ok(SearchConfig::default()), opts.to_search_config());
    }

    #[test]
    fn test_minimax_flags() {
        let config = parse(&["-A", "minimax", "-d", "6", "--no-pruning", "-S", "42"])
            .to_search_config()
            .unwrap();
        assert_eq!(SearchAlgorithm::Minimax, config.algorithm);
        assert_eq!(6, config.depth);
        assert!(!config.alpha_beta);
        assert_eq!(Some(42), config.seed);
        assert_eq!(None, config.limits);
    }

    #[test]
    fn test_mcts_flags() {
        let config = parse(&[
            "--algorithm",
            "mcts",
            "--iterations",
            "500",
            "--exploration",
            "0.7",
            "--rollout-cutoff",
            "12",
            "--time-limit-ms",
            "250",
            "--debug",
        ])
        .to_search_config()
        .unwrap();
        assert_eq!(SearchAlgorithm::MCTS, config.algorithm);
        assert_eq!(500, config.iterations);
        assert_eq!(0.7, config.exploration_constant);
        assert_eq!(Some(12), config.rollout_cutoff);
        assert_eq!(
            Some(SearchLimits {
                max_time_ms: Some(250),
                max_positions: None
            }),
            config.limits
        );
        assert!(config.debug);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert_eq!(Err(ConfigError::ZeroDepth), parse(&["-d", "0"]).to_search_config());
        assert_eq!(
            Err(ConfigError::ZeroIterations),
            parse(&["-A", "mcts", "-I", "0"]).to_search_config()
        );
        assert!(matches!(
            parse(&["-A", "mcts", "-C", "NaN"]).to_search_config(),
            Err(ConfigError::InvalidExploration(..))
        ));
        assert!(SearchOpts::from_iter_safe(["search", "-A", "alphazero"]).is_err());
    }

    #[test]
    fn test_make_search_finds_immediate_win() {
        let mut game = ConnectFour::default();
        for col in [0, 1, 0, 1, 0, 1] {
            game.advance(ConnectFourMove(col)).unwrap();
        }
        let cases: [&[&str]; 2] = [
            &["-A", "minimax", "-d", "2", "-S", "1"],
            &["-A", "mcts", "-I", "200", "-S", "1"],
        ];
        for args in cases {
            let mut search = parse(args).make_search::<ConnectFour>().unwrap();
            let res = search.search(&game, game.to_move()).unwrap();
            assert_eq!(Some(ConnectFourMove(0)), res.best_action(), "{args:?}");
        }
    }
}
