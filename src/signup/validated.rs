use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

/// Output of a successful validation. Field order is the order of the
/// rendered JSON.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ValidatedSignup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub techs: Vec<ValidatedTech>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ValidatedTech {
    pub title: String,
    pub knowledge: Knowledge,
}

/// Coerced knowledge level. Serialized as a JSON integer when integral and
/// as a float otherwise.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Knowledge(pub Decimal);

impl Knowledge {
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Knowledge {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Serialize for Knowledge {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0.normalize();
        if value.fract().is_zero()
            && let Some(integer) = value.to_i64()
        {
            return serializer.serialize_i64(integer);
        }
        match value.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => serializer.serialize_str(&value.to_string()),
        }
    }
}
