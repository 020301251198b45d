use rosomaxa::prelude::Float;

/// Represents a cost value.
pub type Cost = Float;

/// Represents a travel distance in km.
pub type Distance = Float;

/// Represents a time duration in seconds.
pub type Duration = Float;

/// Represents a load weight in kg.
pub type Weight = Float;

/// Represents a load volume in cubic meters.
pub type Volume = Float;
