//! Unit calculators used when estimating materials for an object.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when a calculator gets unusable input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
}

fn finite(name: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, CalcError> {
    if finite(name, value)? > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, CalcError> {
    if finite(name, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::Negative { name, value })
    }
}

/// Floor or ceiling area in m².
pub fn area(length: f64, width: f64) -> Result<f64, CalcError> {
    Ok(non_negative("length", length)? * non_negative("width", width)?)
}

/// Room volume in m³.
pub fn volume(length: f64, width: f64, height: f64) -> Result<f64, CalcError> {
    Ok(area(length, width)? * non_negative("height", height)?)
}

/// Number of pieces needed to cover `area`, where each piece covers
/// `piece_size` plus `gap`, with `reserve_percent` extra on top.
pub fn material_count(
    area: f64,
    piece_size: f64,
    gap: f64,
    reserve_percent: f64,
) -> Result<u64, CalcError> {
    let area = non_negative("area", area)?;
    let effective = positive("piece size", piece_size)? + non_negative("gap", gap)?;
    let reserve = non_negative("reserve", reserve_percent)?;
    Ok((area / effective * (1.0 + reserve / 100.0)).ceil() as u64)
}

/// Which room side the profiles run along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    #[default]
    Width,
    Length,
}

/// Result of [`layout`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutResult {
    /// Whole profiles to buy.
    pub profiles: u64,
    /// Share of bought length that ends up as offcuts, in percent.
    pub waste_percent: f64,
}

/// Profiles needed to cover a room side of `room_size` metres with profiles
/// `profile_length` metres long and `profile_width_mm` millimetres wide, laid
/// at `angle_deg` to the wall.
pub fn layout(
    room_size: f64,
    profile_length: f64,
    profile_width_mm: f64,
    angle_deg: f64,
    direction: LayoutDirection,
) -> Result<LayoutResult, CalcError> {
    let room_size = positive("room size", room_size)?;
    let profile_length = positive("profile length", profile_length)?;
    let profile_width = positive("profile width", profile_width_mm)? / 1000.0;
    let angle = finite("angle", angle_deg)?;

    // Diagonal layouts only; 0 and 90 degrees lie along a wall.
    let effective = if angle > 0.0 && angle < 90.0 {
        room_size / angle.to_radians().cos()
    } else {
        room_size
    };

    let needed = (effective / profile_width).ceil();
    let run = match direction {
        LayoutDirection::Width => room_size,
        LayoutDirection::Length => effective,
    };
    let total_length = needed * run;
    let profiles = (total_length / profile_length).ceil();
    let bought = profiles * profile_length;
    let waste_percent = if bought > 0.0 {
        (bought - total_length) / bought * 100.0
    } else {
        0.0
    };

    Ok(LayoutResult {
        profiles: profiles as u64,
        waste_percent,
    })
}

/// Operation for the free-form two-operand calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Multiply,
    Divide,
    Add,
    Subtract,
}

/// Applies `op` to `a` and `b`. Division by zero yields zero.
pub fn custom(a: f64, b: f64, op: Operation) -> Result<f64, CalcError> {
    let (a, b) = (finite("a", a)?, finite("b", b)?);
    Ok(match op {
        Operation::Multiply => a * b,
        Operation::Divide if b == 0.0 => 0.0,
        Operation::Divide => a / b,
        Operation::Add => a + b,
        Operation::Subtract => a - b,
    })
}
