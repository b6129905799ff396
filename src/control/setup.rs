//! Form values and their validation

use crate::config::Config;
use crate::error::{Error, Result};
use crate::sorting::Algorithm;
use crate::view::ChartStyle;
use rand::seq::SliceRandom;
use rand::Rng;
use std::num::{IntErrorKind, ParseIntError};
use std::time::Duration;

/// Largest array a size field may ask for.
pub const MAX_SIZE: usize = 10_000;

/// Everything a run needs besides the sequence itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub algorithm: Algorithm,
    pub delay: Duration,
    pub chart: ChartStyle,
}

/// Current contents of the controls pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    /// Literal size; takes precedence over the slider when non-blank.
    pub size_text: String,
    pub size_slider: usize,
    /// 1..=100, higher is faster.
    pub speed: u8,
    pub algorithm: Option<Algorithm>,
    pub chart: ChartStyle,
    /// Literal comma-separated array; takes precedence over both sizes.
    pub array_text: String,
}

impl Default for Setup {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Setup {
    pub fn from_config(config: &Config) -> Self {
        Setup {
            size_text: String::new(),
            size_slider: config.defaults.size,
            speed: config.defaults.speed,
            algorithm: config.defaults.algorithm,
            chart: config.defaults.chart,
            array_text: config.defaults.array.clone(),
        }
    }

    /// Derive the input sequence: the literal array if given, otherwise a random
    /// permutation of `1..=size`.
    pub fn build_values<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<i64>> {
        let values = if !self.array_text.trim().is_empty() {
            parse_array(&self.array_text)?
        } else if !self.size_text.trim().is_empty() {
            random_values(parse_size(&self.size_text)?, rng)
        } else {
            random_values(self.size_slider, rng)
        };

        if values.is_empty() {
            return Err(Error::EmptyArray);
        }
        Ok(values)
    }

    pub fn settings(&self) -> Result<RunSettings> {
        let algorithm = self.algorithm.ok_or(Error::NoAlgorithm)?;
        Ok(RunSettings {
            algorithm,
            delay: speed_to_delay(self.speed)?,
            chart: self.chart,
        })
    }

    /// Validate the whole form, checking the input before the algorithm.
    pub fn arm<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(Vec<i64>, RunSettings)> {
        let values = self.build_values(rng)?;
        let settings = self.settings()?;
        Ok((values, settings))
    }
}

/// Parse a literal size: a positive integer no larger than [`MAX_SIZE`].
pub fn parse_size(text: &str) -> Result<usize> {
    let text = text.trim();
    let invalid = |reason| Error::InvalidSize {
        input: text.to_string(),
        reason,
    };

    let size: i64 = text.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => invalid("too large"),
        IntErrorKind::NegOverflow => invalid("must be at least 1"),
        _ => invalid("not a number"),
    })?;
    if size < 1 {
        return Err(invalid("must be at least 1"));
    }
    let size = usize::try_from(size).map_err(|_| invalid("too large"))?;
    if size > MAX_SIZE {
        return Err(invalid("too large"));
    }
    Ok(size)
}

/// Parse a comma-separated list of integers. Blank entries are skipped and at
/// most [`MAX_SIZE`] values are accepted.
pub fn parse_array(text: &str) -> Result<Vec<i64>> {
    let mut values = Vec::new();
    for (index, token) in text.split(',').enumerate() {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let value = token.parse().map_err(|_| Error::InvalidArrayValue {
            token: token.to_string(),
            position: index + 1,
        })?;
        values.push(value);
    }
    if values.len() > MAX_SIZE {
        return Err(Error::ArrayTooLong {
            len: values.len(),
            max: MAX_SIZE,
        });
    }
    Ok(values)
}

/// Map the 1..=100 speed slider onto a step delay of `101 - speed` milliseconds.
pub fn speed_to_delay(speed: u8) -> Result<Duration> {
    if !(1..=100).contains(&speed) {
        return Err(Error::InvalidSpeed(speed));
    }
    Ok(Duration::from_millis(101 - u64::from(speed)))
}

/// Random permutation of `1..=size`.
pub fn random_values<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<i64> {
    let mut values: Vec<i64> = (1..=size as i64).collect();
    values.shuffle(rng);
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size(" 25 ").unwrap(), 25);
        assert!(matches!(
            parse_size("abc"),
            Err(Error::InvalidSize {
                reason: "not a number",
                ..
            })
        ));
        assert!(matches!(
            parse_size("0"),
            Err(Error::InvalidSize {
                reason: "must be at least 1",
                ..
            })
        ));
        assert!(parse_size("-3").is_err());
        assert!(parse_size("2.5").is_err());
        assert!(parse_size("1000000").is_err());
        assert!(matches!(
            parse_size("99999999999999999999"),
            Err(Error::InvalidSize {
                reason: "too large",
                ..
            })
        ));
        assert!(matches!(
            parse_size("-99999999999999999999"),
            Err(Error::InvalidSize {
                reason: "must be at least 1",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_array() {
        assert_eq!(parse_array("5, 3,4 ,1,2").unwrap(), vec![5, 3, 4, 1, 2]);
        assert_eq!(parse_array("1, 2, 3,").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_array("-7,0").unwrap(), vec![-7, 0]);
        assert!(parse_array(" , ").unwrap().is_empty());

        match parse_array("1, two, 3") {
            Err(Error::InvalidArrayValue { token, position }) => {
                assert_eq!(token, "two");
                assert_eq!(position, 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_array_length_limit() {
        let at_limit = vec!["1"; MAX_SIZE].join(",");
        assert_eq!(parse_array(&at_limit).unwrap().len(), MAX_SIZE);

        let over = (0..=MAX_SIZE as i64)
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        match parse_array(&over) {
            Err(Error::ArrayTooLong { len, max }) => {
                assert_eq!(len, MAX_SIZE + 1);
                assert_eq!(max, MAX_SIZE);
            }
            other => panic!("unexpected: {other:?}"),
        }

        // Sorted input this long would recurse once per element in quick sort
        let setup = Setup {
            array_text: over,
            algorithm: Some(Algorithm::Quick),
            ..Setup::default()
        };
        assert!(matches!(
            setup.arm(&mut rng()),
            Err(Error::ArrayTooLong { .. })
        ));
    }

    #[test]
    fn test_speed_to_delay() {
        assert_eq!(speed_to_delay(1).unwrap(), Duration::from_millis(100));
        assert_eq!(speed_to_delay(50).unwrap(), Duration::from_millis(51));
        assert_eq!(speed_to_delay(100).unwrap(), Duration::from_millis(1));
        assert!(matches!(speed_to_delay(0), Err(Error::InvalidSpeed(0))));
        assert!(speed_to_delay(101).is_err());
    }

    #[test]
    fn test_random_values_is_permutation() {
        let mut values = random_values(50, &mut rng());
        values.sort_unstable();
        assert_eq!(values, (1..=50).collect::<Vec<i64>>());
    }

    #[test]
    fn test_build_values_precedence() {
        let mut setup = Setup {
            size_text: "4".to_string(),
            size_slider: 30,
            array_text: "9,8".to_string(),
            ..Setup::default()
        };
        assert_eq!(setup.build_values(&mut rng()).unwrap(), vec![9, 8]);

        setup.array_text.clear();
        assert_eq!(setup.build_values(&mut rng()).unwrap().len(), 4);

        setup.size_text = "  ".to_string();
        assert_eq!(setup.build_values(&mut rng()).unwrap().len(), 30);
    }

    #[test]
    fn test_arm_rejections() {
        let setup = Setup {
            array_text: ",".to_string(),
            algorithm: Some(Algorithm::Quick),
            ..Setup::default()
        };
        assert!(matches!(setup.arm(&mut rng()), Err(Error::EmptyArray)));

        let setup = Setup {
            size_slider: 0,
            algorithm: Some(Algorithm::Quick),
            ..Setup::default()
        };
        assert!(matches!(setup.arm(&mut rng()), Err(Error::EmptyArray)));

        let setup = Setup {
            size_text: "x".to_string(),
            algorithm: None,
            ..Setup::default()
        };
        // Size is checked before the algorithm
        assert!(matches!(setup.arm(&mut rng()), Err(Error::InvalidSize { .. })));

        let setup = Setup {
            size_text: "10".to_string(),
            algorithm: None,
            ..Setup::default()
        };
        assert!(matches!(setup.arm(&mut rng()), Err(Error::NoAlgorithm)));
    }

    #[test]
    fn test_arm_success() {
        let setup = Setup {
            array_text: "3,1,2".to_string(),
            speed: 91,
            algorithm: Some(Algorithm::Insertion),
            chart: ChartStyle::Scatter,
            ..Setup::default()
        };
        let (values, settings) = setup.arm(&mut rng()).unwrap();
        assert_eq!(values, vec![3, 1, 2]);
        assert_eq!(settings.algorithm, Algorithm::Insertion);
        assert_eq!(settings.delay, Duration::from_millis(10));
        assert_eq!(settings.chart, ChartStyle::Scatter);
    }
}
