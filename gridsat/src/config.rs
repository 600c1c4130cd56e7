//! Solver configuration.
use serde::Deserialize;

/// Generates [`SolverConfig`] and [`SolverConfigUpdate`] from a list of documented options.
///
/// The default value of each option is given in its documentation as `(Default: value)` so that
/// it shows up in the generated help text.
macro_rules! solver_config {
    ($(
        $(#[doc = $doc:literal])*
        #[default = $default:expr]
        pub $name:ident: $type:ty,
    )*) => {
        /// Configurable parameters used during solving.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct SolverConfig {
            $(
                $(#[doc = $doc])*
                pub $name: $type,
            )*
        }

        impl Default for SolverConfig {
            fn default() -> SolverConfig {
                SolverConfig {
                    $($name: $default,)*
                }
            }
        }

        impl SolverConfig {
            /// Description of every option, suitable for command line help.
            pub fn help() -> String {
                let mut help = String::new();
                $(
                    help.push_str(concat!(stringify!($name), ": ", stringify!($type), "\n"));
                    $(help.push_str(concat!("   ", $doc, "\n"));)*
                )*
                help
            }
        }

        /// Partial update of a [`SolverConfig`].
        ///
        /// Options that are `None` are left unchanged.
        #[derive(Clone, Debug, Default, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct SolverConfigUpdate {
            $(
                $(#[doc = $doc])*
                pub $name: Option<$type>,
            )*
        }

        impl SolverConfigUpdate {
            /// An update that changes nothing.
            pub fn new() -> SolverConfigUpdate {
                SolverConfigUpdate::default()
            }

            /// Combine two updates, options set in `other` take precedence.
            pub fn merge(&mut self, other: SolverConfigUpdate) {
                $(
                    if other.$name.is_some() {
                        self.$name = other.$name;
                    }
                )*
            }

            /// Apply the update to a configuration.
            pub fn apply(&self, config: &mut SolverConfig) {
                $(
                    if let Some(value) = self.$name.clone() {
                        config.$name = value;
                    }
                )*
            }
        }
    };
}

solver_config! {
    /// Simplify the disjunctions using unit facts before building the implication graph. When
    /// disabled, unit facts become disjunctions of a literal with itself. (Default: true)
    #[default = true]
    pub unit_propagation: bool,

    /// Decide cases with a single strongly connected component or one component per literal
    /// without inspecting the components. (Default: true)
    #[default = true]
    pub scc_fast_paths: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SolverConfig::default();
        assert!(config.unit_propagation);
        assert!(config.scc_fast_paths);
    }

    #[test]
    fn later_updates_win() {
        let mut update = SolverConfigUpdate::new();
        update.merge(toml::from_str("unit_propagation = false").unwrap());
        update.merge(toml::from_str("scc_fast_paths = false").unwrap());
        update.merge(toml::from_str("unit_propagation = true").unwrap());

        let mut config = SolverConfig::default();
        update.apply(&mut config);

        assert!(config.unit_propagation);
        assert!(!config.scc_fast_paths);
    }

    #[test]
    fn unknown_option() {
        assert!(toml::from_str::<SolverConfigUpdate>("vsids_decay = 0.9").is_err());
    }

    #[test]
    fn help_lists_options() {
        let help = SolverConfig::help();
        assert!(help.contains("unit_propagation: bool"));
        assert!(help.contains("scc_fast_paths: bool"));
        assert!(help.contains("(Default: true)"));
    }
}
