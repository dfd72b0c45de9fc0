//! Tunable constants for the decision models.
//!
//! Defaults reproduce the reference tChess AI. Every field can be changed at
//! runtime through `set_option`, which accepts UCI-style option names.

use crate::chess_errors::ChessErrors;

/// How the defend model treats the chance that a super attack connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuperConnectModel {
    /// Fold the connect probability into the save score as an expectation.
    #[default]
    Expected,
    /// Draw the connection from a seeded generator owned by the engine.
    Sampled { seed: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyConfig {
    /// Chance a spent defend token blocks the hit.
    pub block_probability: f64,
    /// Chance a super attack connects at all.
    pub super_hit_probability: f64,
    /// EV margin super must beat base by before it is recommended.
    pub super_margin: f64,
    /// Fraction of the attacker's value at risk when it stands attacked.
    pub hanging_factor: f64,
    /// Share of a kill's value credited to non-lethal damage.
    pub chip_weight: f64,
    /// Ceiling on the opponent's defend propensity.
    pub max_defend_propensity: f64,
    /// `decision_value` at or above which a token is spent.
    pub defend_threshold: f64,
    pub mobility_weight: f64,
    pub center_weight: f64,
    pub king_safety_weight: f64,
    pub super_connect: SuperConnectModel,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            block_probability: 0.5,
            super_hit_probability: 0.4,
            super_margin: 0.35,
            hanging_factor: 0.35,
            chip_weight: 0.6,
            max_defend_propensity: 0.98,
            defend_threshold: 0.55,
            mobility_weight: 0.02,
            center_weight: 0.01,
            king_safety_weight: 0.5,
            super_connect: SuperConnectModel::Expected,
        }
    }
}

impl PolicyConfig {
    /// Update one option by name. Names are matched case-insensitively.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessErrors> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("SuperConnect") {
            let v = value.trim().to_ascii_lowercase();
            self.super_connect = match v.as_str() {
                "expected" => SuperConnectModel::Expected,
                "sampled" => SuperConnectModel::Sampled { seed: 0 },
                _ => {
                    return Err(ChessErrors::InvalidOption(format!(
                        "invalid SuperConnect value '{value}'"
                    )))
                }
            };
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Seed") {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ChessErrors::InvalidOption(format!("invalid Seed value '{value}'")))?;
            self.super_connect = SuperConnectModel::Sampled { seed };
            return Ok(());
        }

        // Probabilities must stay in [0, 1]; weights only need to be finite.
        let (slot, is_probability) = match name.to_ascii_lowercase().as_str() {
            "blockprobability" => (&mut self.block_probability, true),
            "superhitprobability" => (&mut self.super_hit_probability, true),
            "maxdefendpropensity" => (&mut self.max_defend_propensity, true),
            "supermargin" => (&mut self.super_margin, false),
            "hangingfactor" => (&mut self.hanging_factor, false),
            "chipweight" => (&mut self.chip_weight, false),
            "defendthreshold" => (&mut self.defend_threshold, false),
            "mobilityweight" => (&mut self.mobility_weight, false),
            "centerweight" => (&mut self.center_weight, false),
            "kingsafetyweight" => (&mut self.king_safety_weight, false),
            _ => {
                return Err(ChessErrors::InvalidOption(format!(
                    "unknown option '{name}'"
                )))
            }
        };

        let parsed = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ChessErrors::InvalidOption(format!("invalid {name} value '{value}'")))?;
        if is_probability && !(0.0..=1.0).contains(&parsed) {
            return Err(ChessErrors::InvalidOption(format!(
                "{name} must be between 0 and 1, got {parsed}"
            )));
        }
        *slot = parsed;
        Ok(())
    }
}
