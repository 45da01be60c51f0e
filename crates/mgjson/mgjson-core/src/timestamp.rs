//! Timestamp normalization for dynamic samples.
//!
//! Sample times arrive as seconds from a stream-local zero. MGJSON wants UTC
//! date-times, so stream zero is mapped onto the Unix epoch and each offset is
//! rendered with millisecond precision (`1970-01-01T00:00:02.592Z`). The
//! document advertises the encoding through `utcInfo`
//! (`precisionLength: 3`, `isGMT: true`).

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use crate::error::{MgJsonError, Result};
use crate::stream::Sample;

/// Digits after the seconds separator in encoded times.
pub const PRECISION_LENGTH: u8 = 3;

const UTC_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Timing derived from a validated sample sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedSeries {
    /// Encoded time of each sample, in input order.
    pub times: Vec<String>,
    pub start_time: f64,
    pub end_time: f64,
    /// Nominal spacing in seconds, `None` when the stream is irregular.
    pub sample_interval: Option<f64>,
}

/// Encode a stream-local offset (seconds) as an MGJSON UTC timestamp.
///
/// The offset is rounded to the nearest microsecond and then truncated to
/// milliseconds, so `-0.0005` encodes as `1969-12-31T23:59:59.999Z`.
/// Offsets landing outside the years `-9999..=9999` are out of range; past
/// roughly 285 years (2^53 microseconds) the microsecond step is no longer
/// exact in `f64`.
pub fn encode_timestamp(seconds: f64) -> Result<String> {
    let out_of_range = || MgJsonError::TimestampOutOfRange { seconds };
    let micros = (seconds * 1_000_000.0).round();
    if !micros.is_finite() {
        return Err(out_of_range());
    }
    // `as` saturates, and a saturated duration always overflows the date range.
    let instant = OffsetDateTime::UNIX_EPOCH
        .checked_add(Duration::microseconds(micros as i64))
        .ok_or_else(out_of_range)?;
    instant.format(UTC_FORMAT).map_err(|_| out_of_range())
}

/// Decode an MGJSON UTC timestamp back into seconds from the epoch.
pub fn parse_timestamp(value: &str) -> Result<f64> {
    let parsed = PrimitiveDateTime::parse(value, UTC_FORMAT).map_err(|_| {
        MgJsonError::InvalidTimestamp {
            value: value.to_string(),
        }
    })?;
    let offset = parsed.assume_utc() - OffsetDateTime::UNIX_EPOCH;
    Ok(offset.whole_microseconds() as f64 / 1_000_000.0)
}

/// Validate `samples`, encode their times and infer start/end and interval.
///
/// Checks per sample, in order: finite timestamp, finite value, timestamp not
/// before its predecessor.
pub fn normalize(samples: &[Sample], interval_tolerance: f64) -> Result<NormalizedSeries> {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(MgJsonError::EmptySeries),
    };

    let mut times = Vec::with_capacity(samples.len());
    let mut previous: Option<f64> = None;
    for (index, sample) in samples.iter().enumerate() {
        if !sample.time.is_finite() {
            return Err(MgJsonError::NonFiniteTimestamp { index });
        }
        if !sample.value.is_finite() {
            return Err(MgJsonError::NonFiniteValue { index });
        }
        if let Some(prev) = previous {
            if sample.time < prev {
                return Err(MgJsonError::UnsortedSamples {
                    index,
                    previous: prev,
                    current: sample.time,
                });
            }
        }
        previous = Some(sample.time);
        times.push(encode_timestamp(sample.time)?);
    }

    let deltas: Vec<f64> = samples.windows(2).map(|w| w[1].time - w[0].time).collect();

    Ok(NormalizedSeries {
        times,
        start_time: first.time,
        end_time: last.time,
        sample_interval: infer_interval(&deltas, interval_tolerance),
    })
}

/// Median delta when every delta lies within `tolerance * median` of it.
///
/// At least two deltas are required; a single delta cannot establish a cadence.
pub fn infer_interval(deltas: &[f64], tolerance: f64) -> Option<f64> {
    if deltas.len() < 2 {
        return None;
    }
    let median = median(deltas);
    if median <= 0.0 {
        return None;
    }
    let limit = tolerance * median;
    deltas
        .iter()
        .all(|d| (d - median).abs() <= limit)
        .then_some(median)
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f64, f64)]) -> Vec<Sample> {
        points.iter().copied().map(Sample::from).collect()
    }

    #[test]
    fn encodes_offsets_from_the_epoch() {
        assert_eq!(encode_timestamp(0.0).unwrap(), "1970-01-01T00:00:00.000Z");
        assert_eq!(encode_timestamp(2.59292).unwrap(), "1970-01-01T00:00:02.592Z");
        assert_eq!(encode_timestamp(2.23).unwrap(), "1970-01-01T00:00:02.230Z");
        assert_eq!(
            encode_timestamp(86_400.0 + 3_661.5).unwrap(),
            "1970-01-02T01:01:01.500Z"
        );
    }

    #[test]
    fn negative_offsets_floor_to_the_millisecond() {
        assert_eq!(
            encode_timestamp(-0.0005).unwrap(),
            "1969-12-31T23:59:59.999Z"
        );
        assert_eq!(encode_timestamp(-1.0).unwrap(), "1969-12-31T23:59:59.000Z");
    }

    #[test]
    fn rounds_to_microseconds_before_truncating() {
        // 0.0009999996s rounds to 1000us -> 1ms
        assert_eq!(encode_timestamp(0.000_999_999_6).unwrap(), "1970-01-01T00:00:00.001Z");
        assert_eq!(encode_timestamp(0.0019).unwrap(), "1970-01-01T00:00:00.001Z");
    }

    #[test]
    fn huge_offsets_are_out_of_range() {
        assert_eq!(
            encode_timestamp(1.0e12),
            Err(MgJsonError::TimestampOutOfRange { seconds: 1.0e12 })
        );
        assert_eq!(
            encode_timestamp(1.0e300),
            Err(MgJsonError::TimestampOutOfRange { seconds: 1.0e300 })
        );
    }

    #[test]
    fn centuries_ahead_still_encode() {
        assert_eq!(
            encode_timestamp(9_467_280_000.25).unwrap(),
            "2270-01-03T00:00:00.250Z"
        );
        assert_eq!(
            encode_timestamp(253_402_300_799.0).unwrap(),
            "9999-12-31T23:59:59.000Z"
        );
    }

    #[test]
    fn parse_inverts_encode_at_millisecond_precision() {
        for s in [0.0, 2.592, 90_061.5, -1.25] {
            let encoded = encode_timestamp(s).unwrap();
            assert!((parse_timestamp(&encoded).unwrap() - s).abs() < 1e-9);
        }
        assert!(matches!(
            parse_timestamp("1970-01-01 00:00:00"),
            Err(MgJsonError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn two_samples_have_no_interval() {
        let out = normalize(&series(&[(0.0, 1.0), (2.59292, 0.777)]), 0.01).unwrap();
        assert_eq!(out.start_time, 0.0);
        assert_eq!(out.end_time, 2.59292);
        assert_eq!(out.sample_interval, None);
        assert_eq!(
            out.times,
            vec!["1970-01-01T00:00:00.000Z", "1970-01-01T00:00:02.592Z"]
        );
    }

    #[test]
    fn single_sample_is_valid_and_irregular() {
        let out = normalize(&series(&[(5.0, 1.0)]), 0.01).unwrap();
        assert_eq!(out.start_time, 5.0);
        assert_eq!(out.end_time, 5.0);
        assert_eq!(out.sample_interval, None);
    }

    #[test]
    fn regular_cadence_uses_the_median() {
        let out = normalize(
            &series(&[(0.0, 0.0), (1.0, 1.0), (2.005, 4.0), (3.0, 9.0)]),
            0.01,
        )
        .unwrap();
        // deltas 1.0, 1.005, 0.995 -> median 1.0
        let interval = out.sample_interval.expect("regular");
        assert!((interval - 1.0).abs() < 1e-12);
    }

    #[test]
    fn spread_beyond_tolerance_is_irregular() {
        let points = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.03, 0.0)];
        // deltas 1.0, 1.0, 1.03 -> 3% spread around the median
        let out = normalize(&series(&points), 0.01).unwrap();
        assert_eq!(out.sample_interval, None);
        let out = normalize(&series(&points), 0.05).unwrap();
        assert_eq!(out.sample_interval, Some(1.0));
    }

    #[test]
    fn duplicate_timestamps_are_sorted_but_irregular() {
        let out = normalize(&series(&[(1.0, 0.0), (1.0, 1.0), (1.0, 2.0)]), 0.01).unwrap();
        assert_eq!(out.sample_interval, None);
    }

    #[test]
    fn median_of_even_count_averages_the_middle() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn rejects_empty_unsorted_and_non_finite_input() {
        assert_eq!(normalize(&[], 0.01), Err(MgJsonError::EmptySeries));
        assert_eq!(
            normalize(&series(&[(1.0, 0.0), (0.5, 1.0)]), 0.01),
            Err(MgJsonError::UnsortedSamples {
                index: 1,
                previous: 1.0,
                current: 0.5
            })
        );
        assert_eq!(
            normalize(&series(&[(0.0, 0.0), (f64::NAN, 1.0)]), 0.01),
            Err(MgJsonError::NonFiniteTimestamp { index: 1 })
        );
        assert_eq!(
            normalize(&series(&[(0.0, f64::INFINITY)]), 0.01),
            Err(MgJsonError::NonFiniteValue { index: 0 })
        );
    }
}
