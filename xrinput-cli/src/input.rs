use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use xrinput_core::headless::InputValue;

/// A `PATH=VALUE` pair given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedInput {
    pub binding: String,
    pub value: InputValue,
}

impl FromStr for SimulatedInput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (binding, value) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected PATH=VALUE, got `{s}`"))?;
        if binding.is_empty() {
            bail!("missing component path in `{s}`");
        }

        Ok(Self {
            binding: binding.to_owned(),
            value: parse_value(value).with_context(|| format!("bad value for {binding}"))?,
        })
    }
}

fn parse_value(value: &str) -> anyhow::Result<InputValue> {
    Ok(match value {
        "true" => InputValue::Boolean(true),
        "false" => InputValue::Boolean(false),
        _ => match value.split_once(',') {
            Some((x, y)) => InputValue::Vector2f(mint::Vector2 {
                x: x.trim().parse()?,
                y: y.trim().parse()?,
            }),
            None => InputValue::Float(value.parse()?),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_kind() {
        let input: SimulatedInput = "/user/hand/left/input/trigger/value=0.5".parse().unwrap();
        assert_eq!(input.binding, "/user/hand/left/input/trigger/value");
        assert_eq!(input.value, InputValue::Float(0.5));

        let input: SimulatedInput = "/user/hand/right/input/b/click=true".parse().unwrap();
        assert_eq!(input.value, InputValue::Boolean(true));

        let input: SimulatedInput = "/user/hand/left/input/thumbstick=0.25, -1".parse().unwrap();
        assert_eq!(
            input.value,
            InputValue::Vector2f(mint::Vector2 { x: 0.25, y: -1. })
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("/user/hand/left/input/trigger/value".parse::<SimulatedInput>().is_err());
        assert!("=1".parse::<SimulatedInput>().is_err());
        assert!("/user/hand/left/input/trigger/value=pressed"
            .parse::<SimulatedInput>()
            .is_err());
    }
}
