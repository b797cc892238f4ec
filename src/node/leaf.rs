//! Values of number, identifier and csymbol nodes.
//!
//! Getters follow the same policy as the other optional attributes: reading a value
//! which was never set is an error on a strict node, and a logged fallback otherwise.
//! Asking a node for a value its shape doesn't have is always an error.

use rust_decimal::Decimal;
use num_traits::FromPrimitive;

use crate::{
    error::AstError,
    event::{Property, PropertyValue},
};

use super::{AstNode, NodeData, NodeKind, Symbol};

impl AstNode {
    fn unsupported(&self, operation: &'static str) -> AstError {
        AstError::Unsupported { operation, node_type: self.node_type() }
    }

    /// Reads a value out of the node's payload. `read` returns `None` if the payload
    /// doesn't carry the value at all, and `Some(None)` if it is unset.
    fn leaf_value<T>(
        &self,
        property: &'static str,
        read: impl FnOnce(&NodeKind) -> Option<Option<T>>,
        default: T,
    ) -> Result<T, AstError> {
        let value = read(&self.0.borrow().kind);
        let mut value = Some(value.ok_or_else(|| self.unsupported(property))?);
        self.optional_attribute(property, |_: &NodeData| value.take().flatten(), default)
    }

    /// Writes a value into the node's payload, then notifies listeners. `write` returns
    /// the old and new values, or `None` if the payload doesn't carry this value.
    fn update_leaf(
        &self,
        property: Property,
        operation: &'static str,
        write: impl FnOnce(&mut NodeKind) -> Option<(PropertyValue, PropertyValue)>,
    ) -> Result<(), AstError> {
        if self.ignore_on_sentinel(operation) {
            return Ok(());
        }
        let change = write(&mut self.0.borrow_mut().kind);
        let (old, new) = change.ok_or_else(|| self.unsupported(operation))?;
        self.fire_property_change(property, old, new);
        Ok(())
    }

    pub fn integer_value(&self) -> Result<i32, AstError> {
        self.leaf_value("integer", |k| match k {
            NodeKind::Integer { value, .. } => Some(*value),
            _ => None,
        }, 0)
    }

    pub fn set_integer(&self, new: i32) -> Result<(), AstError> {
        self.update_leaf(Property::Value, "set_integer", |k| match k {
            NodeKind::Integer { value, .. } => Some((value.replace(new).into(), PropertyValue::Integer(new))),
            _ => None,
        })
    }

    /// The value of a real node. NaN counts as unset.
    pub fn real_value(&self) -> Result<f64, AstError> {
        self.leaf_value("real", |k| match k {
            NodeKind::Real { value, .. } => Some(Some(*value).filter(|v| !v.is_nan())),
            _ => None,
        }, f64::NAN)
    }

    /// The stored value of a real node, with NaN standing for both unset and `notanumber`.
    pub(crate) fn real_or_nan(&self) -> f64 {
        match &self.0.borrow().kind {
            NodeKind::Real { value, .. } => *value,
            _ => f64::NAN,
        }
    }

    pub fn set_real(&self, new: f64) -> Result<(), AstError> {
        self.update_leaf(Property::Value, "set_real", |k| match k {
            NodeKind::Real { value, .. } => {
                let old = std::mem::replace(value, new);
                Some((PropertyValue::Real(old), PropertyValue::Real(new)))
            }
            _ => None,
        })
    }

    pub fn numerator(&self) -> Result<i32, AstError> {
        self.leaf_value("numerator", |k| match k {
            NodeKind::Rational { numerator, .. } => Some(*numerator),
            _ => None,
        }, 0)
    }

    pub fn set_numerator(&self, new: i32) -> Result<(), AstError> {
        self.update_leaf(Property::Numerator, "set_numerator", |k| match k {
            NodeKind::Rational { numerator, .. } => Some((numerator.replace(new).into(), PropertyValue::Integer(new))),
            _ => None,
        })
    }

    pub fn denominator(&self) -> Result<i32, AstError> {
        self.leaf_value("denominator", |k| match k {
            NodeKind::Rational { denominator, .. } => Some(*denominator),
            _ => None,
        }, 1)
    }

    pub fn set_denominator(&self, new: i32) -> Result<(), AstError> {
        self.update_leaf(Property::Denominator, "set_denominator", |k| match k {
            NodeKind::Rational { denominator, .. } => Some((denominator.replace(new).into(), PropertyValue::Integer(new))),
            _ => None,
        })
    }

    pub fn mantissa(&self) -> Result<f64, AstError> {
        self.leaf_value("mantissa", |k| match k {
            NodeKind::Exponential { mantissa, .. } => Some(Some(*mantissa).filter(|v| !v.is_nan())),
            _ => None,
        }, f64::NAN)
    }

    pub fn set_mantissa(&self, new: f64) -> Result<(), AstError> {
        self.update_leaf(Property::Mantissa, "set_mantissa", |k| match k {
            NodeKind::Exponential { mantissa, .. } => {
                let old = std::mem::replace(mantissa, new);
                Some((PropertyValue::Real(old), PropertyValue::Real(new)))
            }
            _ => None,
        })
    }

    pub fn exponent(&self) -> Result<i32, AstError> {
        self.leaf_value("exponent", |k| match k {
            NodeKind::Exponential { exponent, .. } => Some(*exponent),
            _ => None,
        }, 0)
    }

    pub fn set_exponent(&self, new: i32) -> Result<(), AstError> {
        self.update_leaf(Property::Exponent, "set_exponent", |k| match k {
            NodeKind::Exponential { exponent, .. } => Some((exponent.replace(new).into(), PropertyValue::Integer(new))),
            _ => None,
        })
    }

    /// The units of a number node.
    pub fn units(&self) -> Result<String, AstError> {
        self.leaf_value("units", |k| k.units().cloned(), String::new())
    }

    /// The units of a number node, without treating unset units as an error.
    pub fn units_opt(&self) -> Option<String> {
        self.0.borrow().kind.units().cloned().flatten()
    }

    pub fn is_set_units(&self) -> bool {
        self.units_opt().is_some()
    }

    pub fn set_units(&self, units: &str) -> Result<(), AstError> {
        self.replace_units(Some(units.to_string()))
    }

    pub fn unset_units(&self) -> Result<(), AstError> {
        self.replace_units(None)
    }

    fn replace_units(&self, new: Option<String>) -> Result<(), AstError> {
        self.update_leaf(Property::Units, "set_units", |k| {
            let units = k.units_mut()?;
            let old = std::mem::replace(units, new.clone());
            Some((old.into(), new.into()))
        })
    }

    fn symbol_value(&self, property: &'static str, field: impl FnOnce(&Symbol) -> Option<String>) -> Result<String, AstError> {
        self.leaf_value(property, |k| k.symbol().map(field), String::new())
    }

    fn update_symbol(
        &self,
        property: Property,
        operation: &'static str,
        new: Option<String>,
        field: impl FnOnce(&mut Symbol) -> &mut Option<String>,
    ) -> Result<(), AstError> {
        self.update_leaf(property, operation, |k| {
            let slot = field(k.symbol_mut()?);
            let old = std::mem::replace(slot, new.clone());
            Some((old.into(), new.into()))
        })
    }

    /// The name of an identifier, csymbol, `delay` or user-defined function call.
    pub fn name(&self) -> Result<String, AstError> {
        self.symbol_value("name", |s| s.name.clone())
    }

    pub fn is_set_name(&self) -> bool {
        self.0.borrow().kind.symbol().map_or(false, |s| s.name.is_some())
    }

    pub fn set_name(&self, name: &str) -> Result<(), AstError> {
        self.update_symbol(Property::Name, "set_name", Some(name.to_string()), |s| &mut s.name)
    }

    pub fn definition_url(&self) -> Result<String, AstError> {
        self.symbol_value("definitionURL", |s| s.definition_url.clone())
    }

    pub fn is_set_definition_url(&self) -> bool {
        self.0.borrow().kind.symbol().map_or(false, |s| s.definition_url.is_some())
    }

    pub fn set_definition_url(&self, url: &str) -> Result<(), AstError> {
        self.update_symbol(Property::DefinitionUrl, "set_definition_url", Some(url.to_string()), |s| &mut s.definition_url)
    }

    pub fn encoding(&self) -> Result<String, AstError> {
        self.symbol_value("encoding", |s| s.encoding.clone())
    }

    pub fn set_encoding(&self, encoding: &str) -> Result<(), AstError> {
        self.update_symbol(Property::Encoding, "set_encoding", Some(encoding.to_string()), |s| &mut s.encoding)
    }

    /// The exact value of a number literal, if this is one and its value is set.
    ///
    /// Rationals are divided out, and e-notation is expanded.
    pub fn literal_value(&self) -> Option<Decimal> {
        match &self.0.borrow().kind {
            NodeKind::Integer { value: Some(v), .. } => Some(Decimal::from(*v)),
            NodeKind::Real { value, .. } => Decimal::from_f64(*value),
            NodeKind::Rational { numerator: Some(n), denominator: Some(d), .. } if *d != 0
                => Some(Decimal::from(*n) / Decimal::from(*d)),
            NodeKind::Exponential { mantissa, exponent: Some(e), .. } => {
                let mantissa = Decimal::from_f64(*mantissa)?;
                let scale = Decimal::from_f64(10f64.powi(*e))?;
                mantissa.checked_mul(scale)
            }
            _ => None,
        }
    }

    /// Returns true if this is a number literal with exactly the given value.
    pub fn is_literal(&self, value: i64) -> bool {
        self.literal_value() == Some(Decimal::from(value))
    }
}
