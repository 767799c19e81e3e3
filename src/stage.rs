//! Stage selection: turns the user's stop flags into a single cutoff.

use std::fmt;

/// One point the pipeline may stop at, in execution order.
///
/// `Full` is the only value that does not stop: the backend runs every stage
/// and the driver goes on to assemble and link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Lex,
    Parse,
    Tacky,
    Assemble,
    Codegen,
    Full,
}

impl Stage {
    /// The stoppable stages, in the order their flags are scanned.
    pub const STOPPABLE: [Stage; 5] = [
        Stage::Lex,
        Stage::Parse,
        Stage::Tacky,
        Stage::Assemble,
        Stage::Codegen,
    ];

    /// 1-based index handed to the backend. `Codegen` and `Full` share 5.
    pub fn cutoff(self) -> u8 {
        match self {
            Stage::Lex => 1,
            Stage::Parse => 2,
            Stage::Tacky => 3,
            Stage::Assemble => 4,
            Stage::Codegen | Stage::Full => 5,
        }
    }

    pub fn stops(self) -> bool {
        self != Stage::Full
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Lex => "lex",
            Stage::Parse => "parse",
            Stage::Tacky => "tacky",
            Stage::Assemble => "assemble",
            Stage::Codegen => "codegen",
            Stage::Full => "full",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw "stop after" switches as they come off the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopFlags {
    pub lex: bool,
    pub parse: bool,
    pub tacky: bool,
    pub assemble: bool,
    pub codegen: bool,
}

impl StopFlags {
    fn as_array(self) -> [bool; 5] {
        [self.lex, self.parse, self.tacky, self.assemble, self.codegen]
    }

    /// Earliest requested stop wins; no flag at all means the full pipeline.
    pub fn cutoff(self) -> Stage {
        Stage::STOPPABLE
            .into_iter()
            .zip(self.as_array())
            .find_map(|(stage, set)| set.then_some(stage))
            .unwrap_or(Stage::Full)
    }
}

/// What the backend is told: whether to stop early and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub stop: bool,
    pub cutoff: u8,
}

impl From<Stage> for Selection {
    fn from(stage: Stage) -> Self {
        Selection {
            stop: stage.stops(),
            cutoff: stage.cutoff(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Selection, Stage, StopFlags};

    fn flags_from_bits(bits: u8) -> StopFlags {
        StopFlags {
            lex: bits & 0b00001 != 0,
            parse: bits & 0b00010 != 0,
            tacky: bits & 0b00100 != 0,
            assemble: bits & 0b01000 != 0,
            codegen: bits & 0b10000 != 0,
        }
    }

    #[test]
    fn no_flags_runs_full_pipeline() {
        let selection = Selection::from(StopFlags::default().cutoff());
        assert_eq!(
            selection,
            Selection {
                stop: false,
                cutoff: 5
            }
        );
    }

    #[test]
    fn cutoff_is_earliest_true_flag_for_every_combination() {
        for bits in 0u8..32 {
            let flags = flags_from_bits(bits);
            let selection = Selection::from(flags.cutoff());

            let expected = (0u8..5).find(|&i| bits & (1 << i) != 0).map(|i| i + 1);
            match expected {
                Some(index) => {
                    assert!(selection.stop, "bits {bits:05b}");
                    assert_eq!(selection.cutoff, index, "bits {bits:05b}");
                }
                None => {
                    assert!(!selection.stop);
                    assert_eq!(selection.cutoff, 5);
                }
            }
        }
    }

    #[test]
    fn earlier_flag_overrides_later_ones() {
        let test_cases = vec![
            (
                StopFlags {
                    parse: true,
                    codegen: true,
                    ..Default::default()
                },
                Stage::Parse,
            ),
            (
                StopFlags {
                    lex: true,
                    tacky: true,
                    assemble: true,
                    ..Default::default()
                },
                Stage::Lex,
            ),
            (
                StopFlags {
                    assemble: true,
                    codegen: true,
                    ..Default::default()
                },
                Stage::Assemble,
            ),
        ];

        for (flags, expected) in test_cases {
            assert_eq!(flags.cutoff(), expected);
        }
    }

    #[test]
    fn codegen_stops_at_same_index_as_full() {
        let codegen = Selection::from(Stage::Codegen);
        let full = Selection::from(Stage::Full);
        assert_eq!(codegen.cutoff, full.cutoff);
        assert!(codegen.stop);
        assert!(!full.stop);
    }

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::STOPPABLE.windows(2).all(|w| w[0] < w[1]));
        assert!(Stage::Codegen < Stage::Full);
    }
}
