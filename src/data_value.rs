// Copyright 2021 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::DataKind;

/// Shared, nilable indirection target. The interior mutability is what
/// lets an embedder tie self-referential value graphs together after
/// construction.
pub type SharedValue = Arc<RwLock<DataValue>>;

/// An aggregate with a named field layout, identified by a fully
/// qualified type path such as `app::cache::Entry`.
///
/// The ident is the identity the fixed-size cache keys on; two distinct
/// layouts must not share one.
#[derive(Clone)]
pub struct StructValue {
    ident: String,
    fields: Vec<DataValue>,
}

impl StructValue {
    pub fn new(ident: impl Into<String>, fields: Vec<DataValue>) -> Self {
        StructValue {
            ident: ident.into(),
            fields,
        }
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[DataValue] {
        &self.fields
    }
}

/// A dynamically shaped runtime value.
#[derive(Clone)]
pub enum DataValue {
    /// Base type.
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Binary(Vec<u8>),

    // Container types.
    /// Slice-like sequence whose length is runtime data.
    List(Vec<DataValue>),
    /// Array-like sequence whose length is part of the static type.
    Array(Vec<DataValue>),
    /// Key/value entries in one deterministic iteration order.
    Map(Vec<(DataValue, DataValue)>),
    Struct(StructValue),

    // Indirection types.
    /// Owning polymorphic box.
    Boxed(Box<DataValue>),
    /// Shareable, nilable pointer.
    Ref(Option<SharedValue>),
}

impl DataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null | DataValue::Ref(None))
    }

    pub fn kind(&self) -> DataKind {
        match self {
            DataValue::Null => DataKind::Null,
            DataValue::Boolean(_) => DataKind::Boolean,
            DataValue::Int8(_) => DataKind::Int8,
            DataValue::Int16(_) => DataKind::Int16,
            DataValue::Int32(_) => DataKind::Int32,
            DataValue::Int64(_) => DataKind::Int64,
            DataValue::UInt8(_) => DataKind::UInt8,
            DataValue::UInt16(_) => DataKind::UInt16,
            DataValue::UInt32(_) => DataKind::UInt32,
            DataValue::UInt64(_) => DataKind::UInt64,
            DataValue::Float32(_) => DataKind::Float32,
            DataValue::Float64(_) => DataKind::Float64,
            DataValue::String(_) => DataKind::String,
            DataValue::Binary(_) => DataKind::Binary,
            DataValue::List(_) => DataKind::List,
            DataValue::Array(_) => DataKind::Array,
            DataValue::Map(_) => DataKind::Map,
            DataValue::Struct(_) => DataKind::Struct,
            DataValue::Boxed(_) => DataKind::Pointer,
            DataValue::Ref(_) => DataKind::Pointer,
        }
    }

    /// Wrap a value into a shareable indirection target.
    pub fn shared(value: DataValue) -> SharedValue {
        Arc::new(RwLock::new(value))
    }

    /// A pointer to an existing shared target.
    pub fn reference(target: &SharedValue) -> DataValue {
        DataValue::Ref(Some(target.clone()))
    }

    pub fn null_ref() -> DataValue {
        DataValue::Ref(None)
    }

    pub fn boxed(value: DataValue) -> DataValue {
        DataValue::Boxed(Box::new(value))
    }

    /// Estimated deep memory footprint of this value in bytes.
    pub fn memory_size(&self) -> usize {
        crate::deep_size(self)
    }
}

std_to_data_value!(Boolean, bool);
std_to_data_value!(Int8, i8);
std_to_data_value!(Int16, i16);
std_to_data_value!(Int32, i32);
std_to_data_value!(Int64, i64);
std_to_data_value!(UInt8, u8);
std_to_data_value!(UInt16, u16);
std_to_data_value!(UInt32, u32);
std_to_data_value!(UInt64, u64);
std_to_data_value!(Float32, f32);
std_to_data_value!(Float64, f64);

impl From<&str> for DataValue {
    fn from(x: &str) -> Self {
        DataValue::String(x.to_string())
    }
}

impl From<String> for DataValue {
    fn from(x: String) -> Self {
        DataValue::String(x)
    }
}

impl From<Option<String>> for DataValue {
    fn from(x: Option<String>) -> Self {
        match x {
            Some(v) => DataValue::String(v),
            None => DataValue::Null,
        }
    }
}

impl From<Vec<u8>> for DataValue {
    fn from(x: Vec<u8>) -> Self {
        DataValue::Binary(x)
    }
}

impl From<StructValue> for DataValue {
    fn from(x: StructValue) -> Self {
        DataValue::Struct(x)
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataValue::Null => write!(f, "NULL"),
            DataValue::Boolean(v) => write!(f, "{}", v),
            DataValue::Int8(v) => write!(f, "{}", v),
            DataValue::Int16(v) => write!(f, "{}", v),
            DataValue::Int32(v) => write!(f, "{}", v),
            DataValue::Int64(v) => write!(f, "{}", v),
            DataValue::UInt8(v) => write!(f, "{}", v),
            DataValue::UInt16(v) => write!(f, "{}", v),
            DataValue::UInt32(v) => write!(f, "{}", v),
            DataValue::UInt64(v) => write!(f, "{}", v),
            DataValue::Float32(v) => write!(f, "{}", v),
            DataValue::Float64(v) => write!(f, "{}", v),
            DataValue::String(v) => write!(f, "{}", v),
            DataValue::Binary(v) => {
                for c in v {
                    write!(f, "{:02x}", c)?;
                }
                Ok(())
            }
            DataValue::List(v) | DataValue::Array(v) => {
                write!(
                    f,
                    "[{}]",
                    v.iter()
                        .map(|v| format!("{}", v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            DataValue::Map(v) => {
                write!(
                    f,
                    "{{{}}}",
                    v.iter()
                        .map(|(k, v)| format!("{}: {}", k, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            DataValue::Struct(v) => {
                write!(
                    f,
                    "{} {{{}}}",
                    v.ident(),
                    v.fields()
                        .iter()
                        .map(|v| format!("{}", v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            DataValue::Boxed(v) => write!(f, "{}", v),
            // Targets are not chased here, so printing a cyclic graph
            // terminates.
            DataValue::Ref(None) => write!(f, "NULL"),
            DataValue::Ref(Some(v)) => write!(f, "&{:p}", Arc::as_ptr(v)),
        }
    }
}

impl fmt::Debug for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
