use crate::error::ConfigError;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// frame/damage/cost stats for a single action.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ActionStat {
    pub damage_percent: f64,
    pub sp: u16,
    pub startup: u16,
    pub recovery: u16,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum WeaponKind {
    Sword,
    Axe,
    Staff,
    Wand,
    Bow,
    Dagger,
    Lance,
}

impl WeaponKind {
    /// weapons whose basic-attack and FS hits resolve after a travel delay
    /// instead of landing immediately at the action point.
    pub const fn is_projectile(self) -> bool {
        matches!(self, WeaponKind::Staff | WeaponKind::Wand | WeaponKind::Bow)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum WeaponName {
    Named(u32),
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum AdventurerName {
    Heinwald,
    Amane,
    Annelie,
    Generic,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WeaponClassStat {
    pub x_stats: [ActionStat; 5],
    pub fs_stat: ActionStat,
    /// present iff FS cancels basic-combo recovery; gives the per-combo-step
    /// startup override to use when it does.
    pub xfs_startups: Option<[u16; 5]>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WeaponStat {
    pub name: WeaponName,
    pub kind: WeaponKind,
    pub s3_stat: Option<ActionStat>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AdventurerStat {
    pub name: AdventurerName,
    pub s1_stat: ActionStat,
    pub s2_stat: ActionStat,
    pub base_strength: f64,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Modifiers {
    pub strength_mod: f64,
    pub coability_strength_mod: f64,
    pub skill_dmg_mod: f64,
    pub coability_skill_dmg_mod: f64,
    pub fs_dmg_mod: f64,
    pub crit_rate: f64,
    #[serde(default = "default_crit_dmg_base")]
    pub crit_dmg_base: f64,
}

fn default_crit_dmg_base() -> f64 {
    0.7
}

/// immutable, shared snapshot of everything the simulator needs. loaded once
/// per run and handed to the simulator behind a reference for its lifetime.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub weapon_class: WeaponClassStat,
    pub weapon: WeaponStat,
    pub adventurer: AdventurerStat,
    pub modifiers: Modifiers,
}

impl Config {
    /// read JSON config from `path`, or from stdin when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let text = match path {
            Some(p) => std::fs::read_to_string(p).map_err(|source| ConfigError::Io {
                path: Some(p.to_path_buf()),
                source,
            })?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|source| ConfigError::Io { path: None, source })?;
                buf
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.map(|p| p.to_path_buf()),
            source,
        })
    }

    pub fn skill_stat(&self, slot: usize) -> ActionStat {
        match slot {
            0 => self.adventurer.s1_stat,
            1 => self.adventurer.s2_stat,
            2 => self
                .weapon
                .s3_stat
                .expect("s3 requested but weapon carries no third skill"),
            _ => panic!("skill slot out of range"),
        }
    }

    pub fn has_skill(&self, slot: usize) -> bool {
        slot < 2 || self.weapon.s3_stat.is_some()
    }

    pub fn combo_stat(&self, combo_index: usize) -> ActionStat {
        self.weapon_class.x_stats[combo_index]
    }

    pub fn fs_stat(&self) -> ActionStat {
        self.weapon_class.fs_stat
    }
}
