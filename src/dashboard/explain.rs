// src/dashboard/explain.rs
//! Plain-language descriptions of each Greek with a worked example built from
//! the current values.

use crate::analytics::{Greeks, OptionType};

pub struct GreekNote {
    pub name: &'static str,
    pub value: f64,
    pub definition: &'static str,
    pub points: &'static [&'static str],
    pub example: String,
}

pub const MODEL_ASSUMPTIONS: &[&str] = &[
    "The option can only be exercised at expiration (European options)",
    "No dividends are paid",
    "Constant volatility and risk-free interest rate",
    "Log-normal price dynamics",
    "Markets are efficient, no arbitrage",
];

pub const DISCLAIMER: &str =
    "This model provides theoretical fair value, not a trading recommendation.";

/// Notes for all five Greeks of an option currently worth `price`
pub fn greek_notes(option_type: OptionType, price: f64, g: &Greeks) -> Vec<GreekNote> {
    let delta_example = match option_type {
        OptionType::Call => format!(
            "Your call option has a delta of {:.4}. If the stock rises by $1, the option is expected to gain about ${:.2}, from ${:.2} to ${:.2}.",
            g.delta, g.delta, price, price + g.delta
        ),
        OptionType::Put => format!(
            "Your put option has a delta of {:.4}. If the stock rises by $1, the option is expected to lose about ${:.2}, from ${:.2} to ${:.2}.",
            g.delta, g.delta.abs(), price, price + g.delta
        ),
    };

    vec![
        GreekNote {
            name: "Delta",
            value: g.delta,
            definition: "Rate of change of the option price with respect to the underlying price: the expected move in option value for a $1 move in the stock.",
            points: &[
                "For calls, delta ranges from 0 to 1",
                "For puts, delta ranges from -1 to 0",
                "Delta is larger in magnitude for in-the-money options",
            ],
            example: delta_example,
        },
        GreekNote {
            name: "Gamma",
            value: g.gamma,
            definition: "Rate of change of delta with respect to the underlying price.",
            points: &[
                "Gamma is the same for calls and puts with the same strike and expiry",
                "Gamma is highest for at-the-money options",
                "Gamma rises as an at-the-money option nears expiry",
            ],
            example: format!(
                "Your option has a gamma of {:.4}. If the stock rises by $1, delta is expected to move from {:.4} to {:.4}.",
                g.gamma,
                g.delta,
                g.delta + g.gamma
            ),
        },
        GreekNote {
            name: "Vega",
            value: g.vega,
            definition: "Change in option price for a 1 percentage-point change in volatility.",
            points: &[
                "Vega is the same for calls and puts with the same strike and expiry",
                "Vega is highest for at-the-money and longer-dated options",
                "Implied volatility can be recovered by solving the model for the volatility that matches a market price",
            ],
            example: format!(
                "Your option has a vega of {:.4}. If volatility rises by 1%, the option is expected to move from ${:.2} to ${:.2}.",
                g.vega,
                price,
                price + g.vega
            ),
        },
        GreekNote {
            name: "Theta",
            value: g.theta,
            definition: "Change in option price for one calendar day passing (time decay).",
            points: &[
                "Theta is typically negative for long options",
                "Time decay accelerates as expiry approaches",
                "Theta is largest in magnitude for at-the-money options",
            ],
            example: format!(
                "Your option has a theta of {:.4}. After one day the option is expected to move from ${:.2} to ${:.2}.",
                g.theta,
                price,
                price + g.theta
            ),
        },
        GreekNote {
            name: "Rho",
            value: g.rho,
            definition: "Change in option price for a 1 percentage-point change in the risk-free rate.",
            points: &[
                "Rho is positive for calls and negative for puts",
                "Rho grows with time to expiry",
                "Rates move slowly, so rho usually matters less than the other Greeks",
            ],
            example: format!(
                "Your option has a rho of {:.4}. If rates rise by 1%, the option is expected to move from ${:.2} to ${:.2}.",
                g.rho,
                price,
                price + g.rho
            ),
        },
    ]
}

impl GreekNote {
    pub fn render(&self) -> String {
        let mut out = format!("### {} ({:.4})\n{}\n", self.name, self.value, self.definition);
        for point in self.points {
            out.push_str("  - ");
            out.push_str(point);
            out.push('\n');
        }
        out.push_str("  Example: ");
        out.push_str(&self.example);
        out.push('\n');
        out
    }
}
