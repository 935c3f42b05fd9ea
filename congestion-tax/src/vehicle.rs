//! Vehicles and their classification.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// The classification of a vehicle, which decides whether it is exempt from congestion tax.
///
/// Tags are deserialized like [`FromStr`] parses them, ignoring case.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Car,
    Motorcycle,
    Bus,
    Emergency,
    Diplomat,
    Foreign,
    Military,
}

impl VehicleType {
    /// Every known vehicle type.
    pub const ALL: [Self; 7] = [
        Self::Car,
        Self::Motorcycle,
        Self::Bus,
        Self::Emergency,
        Self::Diplomat,
        Self::Foreign,
        Self::Military,
    ];

    /// Whether this type is exempt under the default rules. Only cars are taxed.
    #[must_use]
    pub fn is_exempt_by_default(self) -> bool {
        self != Self::Car
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Motorcycle => "Motorcycle",
            Self::Bus => "Bus",
            Self::Emergency => "Emergency",
            Self::Diplomat => "Diplomat",
            Self::Foreign => "Foreign",
            Self::Military => "Military",
        }
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    /// Parse a vehicle type tag, ignoring case. The plural `Busses` is accepted for buses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("busses") {
            return Ok(Self::Bus);
        }

        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownVehicleType(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for VehicleType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let s = <String as Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle passing a charge point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Vehicle {
    #[serde(rename = "type")]
    vehicle_type: VehicleType,
}

impl Vehicle {
    #[must_use]
    pub const fn new(vehicle_type: VehicleType) -> Self {
        Self { vehicle_type }
    }

    #[must_use]
    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }
}

impl From<VehicleType> for Vehicle {
    fn from(vehicle_type: VehicleType) -> Self {
        Self::new(vehicle_type)
    }
}

impl FromStr for Vehicle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::new)
    }
}
