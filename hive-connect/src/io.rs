use crate::error::HiveError;
use crate::tcli::{TTableSchema, TTypeId};
use crate::value::{Row, Value};

use arrow::array::{
    ArrayRef, BinaryBuilder, BooleanBuilder, Float64Builder, Int16Builder, Int32Builder,
    Int64Builder, Int8Builder, NullArray, StringBuilder,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;


/// Arrow type used for a server column type.
///
/// Types the server ships as strings (timestamps, decimals, dates, complex
/// types, ...) stay `Utf8`. Floats arrive widened to doubles.
pub fn arrow_type(type_id: TTypeId) -> DataType {
    match type_id {
        TTypeId::BooleanType => DataType::Boolean,
        TTypeId::TinyintType => DataType::Int8,
        TTypeId::SmallintType => DataType::Int16,
        TTypeId::IntType => DataType::Int32,
        TTypeId::BigintType => DataType::Int64,
        TTypeId::FloatType | TTypeId::DoubleType => DataType::Float64,
        TTypeId::BinaryType => DataType::Binary,
        TTypeId::NullType => DataType::Null,
        _ => DataType::Utf8,
    }
}

pub fn to_schema(table: &TTableSchema) -> SchemaRef {
    let mut columns = table.columns.clone();
    columns.sort_by_key(|c| c.position);

    let fields: Vec<Field> = columns
        .iter()
        .map(|c| {
            let type_id = TTypeId::try_from(c.type_id).unwrap_or(TTypeId::StringType);
            Field::new(&c.column_name, arrow_type(type_id), true)
        })
        .collect();

    Arc::new(Schema::new(fields))
}

pub fn to_record_batch(rows: &[Row], schema: &SchemaRef) -> Result<RecordBatch, HiveError> {
    if schema.fields().is_empty() {
        return Ok(RecordBatch::new_empty(schema.clone()));
    }

    for row in rows {
        if row.len() != schema.fields().len() {
            return Err(HiveError::Arrow(format!(
                "Expected {} columns in row but got {}",
                schema.fields().len(),
                row.len()
            )));
        }
    }

    let columns = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| build_column(rows, index, field))
        .collect::<Result<Vec<ArrayRef>, HiveError>>()?;

    Ok(RecordBatch::try_new(schema.clone(), columns)?)
}

fn build_column(rows: &[Row], index: usize, field: &Field) -> Result<ArrayRef, HiveError> {
    let cells = rows.iter().map(|row| &row.values()[index]);

    // Appends every cell through `$read`, mapping `NULL` to a null slot.
    macro_rules! build {
        ($builder:expr, $read:expr) => {{
            let mut builder = $builder;
            for cell in cells {
                match cell {
                    Value::Null => builder.append_null(),
                    other => builder.append_value($read(other)?),
                }
            }
            Arc::new(builder.finish()) as ArrayRef
        }};
    }

    let array = match field.data_type() {
        DataType::Boolean => build!(BooleanBuilder::new(), |v| bool_of(v, field)),
        DataType::Int8 => build!(Int8Builder::new(), |v| int_of::<i8>(v, field)),
        DataType::Int16 => build!(Int16Builder::new(), |v| int_of::<i16>(v, field)),
        DataType::Int32 => build!(Int32Builder::new(), |v| int_of::<i32>(v, field)),
        DataType::Int64 => build!(Int64Builder::new(), |v| int_of::<i64>(v, field)),
        DataType::Float64 => build!(Float64Builder::new(), |v| double_of(v, field)),
        DataType::Binary => build!(BinaryBuilder::new(), |v| binary_of(v, field)),
        DataType::Null => Arc::new(NullArray::new(rows.len())) as ArrayRef,
        _ => build!(StringBuilder::new(), |v: &Value| Ok::<_, HiveError>(v.to_string())),
    };

    Ok(array)
}

fn column_mismatch(value: &Value, field: &Field) -> HiveError {
    HiveError::Arrow(format!(
        "value '{}' does not fit column '{}' of type {}",
        value,
        field.name(),
        field.data_type()
    ))
}

fn bool_of(value: &Value, field: &Field) -> Result<bool, HiveError> {
    match value {
        Value::Boolean(v) => Ok(*v),
        other => Err(column_mismatch(other, field)),
    }
}

fn int_of<T: TryFrom<i64>>(value: &Value, field: &Field) -> Result<T, HiveError> {
    let wide = match value {
        Value::TinyInt(v) => *v as i64,
        Value::SmallInt(v) => *v as i64,
        Value::Int(v) => *v as i64,
        Value::BigInt(v) => *v,
        other => return Err(column_mismatch(other, field)),
    };
    T::try_from(wide).map_err(|_| column_mismatch(value, field))
}

fn double_of(value: &Value, field: &Field) -> Result<f64, HiveError> {
    match value {
        Value::Double(v) => Ok(*v),
        other => Err(column_mismatch(other, field)),
    }
}

fn binary_of(value: &Value, field: &Field) -> Result<Vec<u8>, HiveError> {
    match value {
        Value::Binary(v) => Ok(v.clone()),
        Value::String(v) => Ok(v.as_bytes().to_vec()),
        other => Err(column_mismatch(other, field)),
    }
}
