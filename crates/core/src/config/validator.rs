//! Configuration validation.
//!
//! Bad values never abort startup. Out-of-range general settings are
//! clamped, and keybindings whose combo or command does not parse are
//! dropped with a warning while the rest keep working.

use tracing::warn;

use crate::commands::Command;
use crate::config::schema::Config;
use crate::keybinds::parser::parse_combo;

/// Clamp general settings and drop unusable keybindings, in place.
pub fn validate(config: &mut Config) {
    if config.general.workspace_count == 0 {
        warn!("workspace_count 0 is not usable, using 1");
        config.general.workspace_count = 1;
    }

    let ratio = config.general.master_ratio;
    config.general.master_ratio = ratio.clamp(0.1, 0.9);
    if config.general.master_ratio != ratio {
        warn!(
            "master_ratio {} out of [0.1, 0.9], clamped to {}",
            ratio, config.general.master_ratio
        );
    }

    if config.general.gap < 0 {
        warn!("negative gap {}, using 0", config.general.gap);
        config.general.gap = 0;
    }

    config.keybinds.retain(|keybind| {
        if let Err(err) = parse_combo(&keybind.combo) {
            warn!("dropping keybind: {}", err);
            return false;
        }
        if Command::parse(&keybind.command, &keybind.args).is_none() {
            warn!(
                "dropping keybind '{}': unknown command '{}'",
                keybind.combo, keybind.command
            );
            return false;
        }
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Keybind;

    #[test]
    fn test_default_config_passes_untouched() {
        let mut config = Config::default();
        let binds_before = config.keybinds.len();
        validate(&mut config);
        assert_eq!(config.keybinds.len(), binds_before);
        assert_eq!(config.general.workspace_count, 9);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.general.workspace_count = 0;
        config.general.master_ratio = 3.0;
        config.general.gap = -4;

        validate(&mut config);
        assert_eq!(config.general.workspace_count, 1);
        assert!((config.general.master_ratio - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.general.gap, 0);
    }

    #[test]
    fn test_bad_keybinds_are_dropped_good_ones_kept() {
        let mut config = Config::default();
        config.keybinds = vec![
            Keybind {
                combo: "alt+1".into(),
                command: "switch_workspace_1".into(),
                args: vec![],
            },
            Keybind {
                combo: "hyper+1".into(),
                command: "switch_workspace_1".into(),
                args: vec![],
            },
            Keybind {
                combo: "alt+2".into(),
                command: "do_a_barrel_roll".into(),
                args: vec![],
            },
        ];

        validate(&mut config);
        assert_eq!(config.keybinds.len(), 1);
        assert_eq!(config.keybinds[0].combo, "alt+1");
    }
}
