//! A lightweight uom-ish set of quantities for the placement math.

use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

use orbit_types::prelude::UtcTimestamp;

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters)
    }
}

impl Length {
    pub fn from_meters(meters: f64) -> Length {
        Length { meters }
    }

    pub fn from_kilometers(km: f64) -> Length {
        Length {
            meters: km * 1000.0,
        }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_kilometers(&self) -> f64 {
        self.meters / 1000.0
    }
}

impl Div<Length> for Length {
    type Output = Ratio;

    fn div(self, rhs: Length) -> Self::Output {
        Ratio::from_f64(self.as_meters() / rhs.as_meters())
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Ratio {
    ratio: f64,
}

impl std::fmt::Debug for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ratio)
    }
}

impl Ratio {
    pub fn from_f64(ratio: f64) -> Ratio {
        Ratio { ratio }
    }

    pub fn as_f64(&self) -> f64 {
        self.ratio
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Timestamp {
    utc: UtcTimestamp,
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utc)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utc)
    }
}

impl Timestamp {
    pub fn now() -> Timestamp {
        Timestamp::from_utc(chrono::Utc::now())
    }

    pub fn from_utc(utc: UtcTimestamp) -> Timestamp {
        Timestamp { utc }
    }

    pub fn as_utc(&self) -> &UtcTimestamp {
        &self.utc
    }

    pub fn as_millis(&self) -> i64 {
        self.utc.timestamp_millis()
    }
}

impl From<UtcTimestamp> for Timestamp {
    fn from(utc: UtcTimestamp) -> Self {
        Timestamp::from_utc(utc)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Time;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        Time::from_chrono_duration(*self.as_utc() - *rhs.as_utc())
    }
}

impl Add<Time> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Time) -> Self::Output {
        let mut ts = self;
        ts += rhs;
        ts
    }
}

impl AddAssign<Time> for Timestamp {
    fn add_assign(&mut self, rhs: Time) {
        self.utc += chrono::Duration::nanoseconds(rhs.as_nanos());
    }
}

impl Sub<Time> for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Time) -> Self::Output {
        let mut ts = self;
        ts -= rhs;
        ts
    }
}

impl SubAssign<Time> for Timestamp {
    fn sub_assign(&mut self, rhs: Time) {
        self.utc -= chrono::Duration::nanoseconds(rhs.as_nanos());
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Time {
    seconds: f64,
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} s", self.seconds)
    }
}

impl Time {
    /// Durations beyond the nanosecond range (~292 years) fall back to millisecond resolution
    pub fn from_chrono_duration(duration: chrono::Duration) -> Time {
        let seconds = match duration.num_nanoseconds() {
            Some(ns) => ns as f64 / 1_000_000_000.0,
            None => duration.num_milliseconds() as f64 / 1_000.0,
        };
        Time { seconds }
    }

    pub fn from_days(days: f64) -> Time {
        Self::from_hours(days * 24.0)
    }

    pub fn from_hours(hours: f64) -> Time {
        Self::from_minutes(hours * 60.0)
    }

    pub fn from_minutes(minutes: f64) -> Time {
        Self::from_secs(minutes * 60.0)
    }

    pub fn from_secs(seconds: f64) -> Time {
        Time { seconds }
    }

    pub fn as_secs(&self) -> f64 {
        self.seconds
    }

    pub fn as_nanos(&self) -> i64 {
        (self.seconds * 1_000_000_000.0) as i64
    }
}

impl AddAssign<Time> for Time {
    fn add_assign(&mut self, rhs: Time) {
        self.seconds += rhs.as_secs()
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Self::Output {
        Time::from_secs(self.as_secs() * rhs)
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Angle {
    degrees: f64,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle { degrees }
    }

    pub fn as_degrees(&self) -> f64 {
        self.degrees
    }

    pub fn as_radians(&self) -> f64 {
        self.degrees.to_radians()
    }

    /// Wrapped into [0°, 360°)
    pub fn normalized(&self) -> Angle {
        let d = self.degrees.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360
        Angle {
            degrees: if d >= 360.0 { 0.0 } else { d },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn timestamp_arithmetic() {
        let t0 = Timestamp::from_utc("2026-01-01T00:00:00Z".parse().unwrap());
        let t1 = t0 + Time::from_minutes(1.5);
        assert_relative_eq!((t1 - t0).as_secs(), 90.0);
        assert_relative_eq!((t0 - t1).as_secs(), -90.0);
        assert_eq!(t1 - Time::from_secs(90.0), t0);
    }

    #[test]
    fn long_durations_do_not_overflow() {
        let t0 = Timestamp::from_utc("1800-01-01T00:00:00Z".parse().unwrap());
        let t1 = Timestamp::from_utc("2200-01-01T00:00:00Z".parse().unwrap());
        let dt = t1 - t0;
        assert!(dt.as_secs().is_finite());
        assert_relative_eq!(dt.as_secs(), 12_622_780_800.0);
    }

    #[test]
    fn angle_normalization() {
        assert_relative_eq!(Angle::from_degrees(370.0).normalized().as_degrees(), 10.0);
        assert_relative_eq!(Angle::from_degrees(-90.0).normalized().as_degrees(), 270.0);
        assert_relative_eq!(Angle::from_degrees(720.0).normalized().as_degrees(), 0.0);
        let tiny = Angle::from_degrees(-1e-15).normalized().as_degrees();
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn length_conversions() {
        let l = Length::from_kilometers(6371.0);
        assert_relative_eq!(l.as_meters(), 6_371_000.0);
        assert_relative_eq!((l / Length::from_meters(6_371_000.0)).as_f64(), 1.0);
    }
}
