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

use memest::DataKind;
use memest::DataValue;
use memest::StructValue;
use pretty_assertions::assert_eq;

#[test]
fn test_kind_classification() {
    assert_eq!(DataKind::Null, DataValue::Null.kind());
    assert_eq!(DataKind::Boolean, DataValue::Boolean(true).kind());
    assert_eq!(DataKind::Int32, DataValue::from(1i32).kind());
    assert_eq!(DataKind::Float64, DataValue::from(1f64).kind());
    assert_eq!(DataKind::String, DataValue::from("x").kind());
    assert_eq!(DataKind::List, DataValue::List(vec![]).kind());
    assert_eq!(DataKind::Map, DataValue::Map(vec![]).kind());
    assert_eq!(
        DataKind::Struct,
        DataValue::Struct(StructValue::new("app::T", vec![])).kind()
    );
    assert_eq!(DataKind::Pointer, DataValue::null_ref().kind());
    assert_eq!(DataKind::Pointer, DataValue::boxed(DataValue::Null).kind());
    assert!(DataValue::null_ref().kind().is_pointer());

    assert_eq!("Pointer", format!("{}", DataKind::Pointer));
    assert_eq!("UInt32", format!("{}", DataValue::UInt32(0).kind()));
}

#[test]
fn test_is_null() {
    assert!(DataValue::Null.is_null());
    assert!(DataValue::null_ref().is_null());
    assert!(!DataValue::Int64(0).is_null());
    assert!(!DataValue::from("").is_null());
}

#[test]
fn test_from_std_values() {
    assert_eq!(DataKind::UInt16, DataValue::from(1u16).kind());
    assert_eq!(DataKind::Boolean, DataValue::from(false).kind());
    assert_eq!(DataKind::Binary, DataValue::from(vec![0u8]).kind());

    // Absent options degrade to Null.
    assert_eq!(DataKind::Null, DataValue::from(None::<i64>).kind());
    assert_eq!(DataKind::Int64, DataValue::from(Some(3i64)).kind());
    assert_eq!(DataKind::Null, DataValue::from(None::<String>).kind());
}

#[test]
fn test_display() {
    assert_eq!("NULL", format!("{}", DataValue::Null));
    assert_eq!("NULL", format!("{}", DataValue::null_ref()));
    assert_eq!("3", format!("{}", DataValue::Int64(3)));
    assert_eq!("abc", format!("{}", DataValue::from("abc")));
    assert_eq!("0a0b", format!("{}", DataValue::from(vec![10u8, 11])));
    assert_eq!(
        "[1, 2]",
        format!("{}", DataValue::List(vec![
            DataValue::UInt8(1),
            DataValue::UInt8(2)
        ]))
    );
    assert_eq!(
        "{1: a}",
        format!(
            "{}",
            DataValue::Map(vec![(DataValue::UInt8(1), DataValue::from("a"))])
        )
    );
    assert_eq!(
        "app::Point {1, 2}",
        format!(
            "{}",
            DataValue::Struct(StructValue::new("app::Point", vec![
                DataValue::Int64(1),
                DataValue::Int64(2),
            ]))
        )
    );
    assert_eq!("7", format!("{}", DataValue::boxed(DataValue::UInt8(7))));
}

#[test]
fn test_display_of_cyclic_value_terminates() {
    let node = DataValue::shared(DataValue::Null);
    *node.write() = DataValue::Struct(StructValue::new("app::Node", vec![
        DataValue::reference(&node),
    ]));

    // References print as an address, not the target, so this returns.
    let rendered = format!("{}", DataValue::reference(&node));
    assert!(rendered.starts_with('&'));
}
