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

use std::collections::HashMap;
use std::fmt;
use std::mem;

use crate::DataValue;

/// Flat shape classification of a [`DataValue`], the unit the size
/// estimator dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Binary,
    List,
    Array,
    Map,
    Struct,
    Pointer,
}

impl DataKind {
    /// Shallow static width of this shape under the host representation,
    /// excluding anything reachable only through indirection.
    pub fn memory_width(&self) -> usize {
        match self {
            DataKind::Null => 0,
            DataKind::Boolean => mem::size_of::<bool>(),
            DataKind::Int8 => mem::size_of::<i8>(),
            DataKind::Int16 => mem::size_of::<i16>(),
            DataKind::Int32 => mem::size_of::<i32>(),
            DataKind::Int64 => mem::size_of::<i64>(),
            DataKind::UInt8 => mem::size_of::<u8>(),
            DataKind::UInt16 => mem::size_of::<u16>(),
            DataKind::UInt32 => mem::size_of::<u32>(),
            DataKind::UInt64 => mem::size_of::<u64>(),
            DataKind::Float32 => mem::size_of::<f32>(),
            DataKind::Float64 => mem::size_of::<f64>(),
            DataKind::String => mem::size_of::<String>(),
            DataKind::Binary => mem::size_of::<Vec<u8>>(),
            DataKind::List => mem::size_of::<Vec<DataValue>>(),
            DataKind::Map => mem::size_of::<HashMap<u64, u64>>(),
            // Field slots and array elements are stored inline; each
            // constituent's own width accrues when it is visited.
            DataKind::Struct => 0,
            DataKind::Array => 0,
            DataKind::Pointer => mem::size_of::<usize>(),
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, DataKind::Pointer)
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
