use crate::error::HiveError;
use crate::tcli::{t_column, t_column_value, TColumn, TColumnValue, TRowSet};

use serde::Serialize;
use std::fmt;


/// A single column value as returned by the server.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(_) => "BOOLEAN",
            Value::TinyInt(_) => "TINYINT",
            Value::SmallInt(_) => "SMALLINT",
            Value::Int(_) => "INT",
            Value::BigInt(_) => "BIGINT",
            Value::Double(_) => "DOUBLE",
            Value::String(_) => "STRING",
            Value::Binary(_) => "BINARY",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::TinyInt(v) => write!(f, "{}", v),
            Value::SmallInt(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Binary(v) => {
                for byte in v {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

/// Conversion of a [`Value`] into a native Rust type.
///
/// Integer types widen (a `TINYINT` reads as `i64`) but never narrow.
/// `Option<T>` maps `NULL` to `None`; any other target type rejects `NULL`.
///
/// # Examples
///
/// ```
/// use hive_connect::{FromValue, Value};
///
/// assert_eq!(i64::from_value(&Value::Int(7)).unwrap(), 7);
/// assert_eq!(Option::<String>::from_value(&Value::Null).unwrap(), None);
/// assert!(i32::from_value(&Value::BigInt(1)).is_err());
/// ```
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, HiveError>;
}

fn mismatch<T>(value: &Value, target: &str) -> Result<T, HiveError> {
    Err(HiveError::Conversion(format!(
        "cannot read {} value '{}' as {}",
        value.type_name(),
        value,
        target
    )))
}

/// Macro to implement FromValue for a type readable from a set of Value variants.
macro_rules! impl_from_value {
    ($ty:ty => $($variant:ident),+) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, HiveError> {
                match value {
                    $(Value::$variant(v) => Ok(<$ty>::from(v.clone())),)+
                    _ => mismatch(value, stringify!($ty)),
                }
            }
        }
    };
}

impl_from_value!(bool => Boolean);
impl_from_value!(i8 => TinyInt);
impl_from_value!(i16 => TinyInt, SmallInt);
impl_from_value!(i32 => TinyInt, SmallInt, Int);
impl_from_value!(i64 => TinyInt, SmallInt, Int, BigInt);
impl_from_value!(f64 => Double);
impl_from_value!(String => String);
impl_from_value!(Vec<u8> => Binary);

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, HiveError> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, HiveError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// One result row, materialized from a buffered page on demand.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Reads column `index` as `T`.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, HiveError> {
        let value = self.values.get(index).ok_or_else(|| {
            HiveError::InvalidArgument(format!(
                "column index {} out of range for a row of {} columns",
                index,
                self.values.len()
            ))
        })?;
        T::from_value(value)
    }
}

/// A fetched page of results, kept in wire form until rows are asked for.
#[derive(Clone, Debug, Default)]
pub(crate) struct Page {
    rows: TRowSet,
    len: usize,
}

impl Page {
    pub(crate) fn new(rows: TRowSet) -> Self {
        let len = if rows.columns.is_empty() {
            rows.rows.len()
        } else {
            rows.columns.iter().map(column_len).max().unwrap_or(0)
        };
        Self { rows, len }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Materializes row `index`. Row-major pages are read directly;
    /// column-major pages take the `index`-th entry of every column.
    pub(crate) fn row(&self, index: usize) -> Row {
        if self.rows.columns.is_empty() {
            let values = self.rows.rows[index]
                .col_vals
                .iter()
                .map(cell_value)
                .collect();
            Row::new(values)
        } else {
            let values = self
                .rows
                .columns
                .iter()
                .map(|column| column_value(column, index))
                .collect();
            Row::new(values)
        }
    }
}

fn cell_value(cell: &TColumnValue) -> Value {
    use t_column_value::Value as Cell;

    match &cell.value {
        None => Value::Null,
        Some(Cell::BoolVal(v)) => v.value.map_or(Value::Null, Value::Boolean),
        Some(Cell::ByteVal(v)) => v.value.map_or(Value::Null, |v| Value::TinyInt(v as i8)),
        Some(Cell::I16Val(v)) => v.value.map_or(Value::Null, |v| Value::SmallInt(v as i16)),
        Some(Cell::I32Val(v)) => v.value.map_or(Value::Null, Value::Int),
        Some(Cell::I64Val(v)) => v.value.map_or(Value::Null, Value::BigInt),
        Some(Cell::DoubleVal(v)) => v.value.map_or(Value::Null, Value::Double),
        Some(Cell::StringVal(v)) => v.value.clone().map_or(Value::Null, Value::String),
    }
}

fn column_len(column: &TColumn) -> usize {
    use t_column::Values;

    match &column.values {
        None => 0,
        Some(Values::BoolVal(c)) => c.values.len(),
        Some(Values::ByteVal(c)) => c.values.len(),
        Some(Values::I16Val(c)) => c.values.len(),
        Some(Values::I32Val(c)) => c.values.len(),
        Some(Values::I64Val(c)) => c.values.len(),
        Some(Values::DoubleVal(c)) => c.values.len(),
        Some(Values::StringVal(c)) => c.values.len(),
        Some(Values::BinaryVal(c)) => c.values.len(),
    }
}

fn is_null(nulls: &[u8], index: usize) -> bool {
    nulls
        .get(index / 8)
        .is_some_and(|byte| byte & (1 << (index % 8)) != 0)
}

fn column_value(column: &TColumn, index: usize) -> Value {
    use t_column::Values;

    // Reads `values[index]` unless the null bitmap marks it or the column is short.
    macro_rules! read {
        ($column:expr, $wrap:expr) => {
            match $column.values.get(index) {
                Some(v) if !is_null(&$column.nulls, index) => $wrap(v.clone()),
                _ => Value::Null,
            }
        };
    }

    match &column.values {
        None => Value::Null,
        Some(Values::BoolVal(c)) => read!(c, Value::Boolean),
        Some(Values::ByteVal(c)) => read!(c, |v: i32| Value::TinyInt(v as i8)),
        Some(Values::I16Val(c)) => read!(c, |v: i32| Value::SmallInt(v as i16)),
        Some(Values::I32Val(c)) => read!(c, Value::Int),
        Some(Values::I64Val(c)) => read!(c, Value::BigInt),
        Some(Values::DoubleVal(c)) => read!(c, Value::Double),
        Some(Values::StringVal(c)) => read!(c, Value::String),
        Some(Values::BinaryVal(c)) => read!(c, Value::Binary),
    }
}
