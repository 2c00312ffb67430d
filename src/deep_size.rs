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
use std::collections::HashSet;
use std::mem;
use std::sync::Arc;

use log::trace;

use crate::DataValue;

/// Outcome of visiting one value: the bytes it contributes and whether
/// that number depends on runtime content rather than static layout.
#[derive(Debug, Clone, Copy, Default)]
struct SizeInfo {
    size: usize,
    is_variable: bool,
}

/// Bookkeeping for one top-level estimation, never shared across calls.
#[derive(Default)]
struct TraversalState {
    /// Addresses of indirection targets already dereferenced. Insertion
    /// happens before recursing into a target, which bounds recursion on
    /// cyclic graphs and counts shared targets once.
    visited: HashSet<usize>,
    /// Computed sizes of fixed-size struct idents. Only structs whose
    /// walk came back non-variable are ever inserted, so an entry is
    /// valid for every occurrence of the ident.
    struct_sizes: HashMap<String, usize>,
}

/// Estimate the deep memory footprint of `value` in bytes.
///
/// Best effort: shared indirection targets contribute at most once,
/// cycles terminate, and absent or nil branches contribute zero. The
/// walk never fails.
pub fn deep_size(value: &DataValue) -> usize {
    let mut state = TraversalState::default();
    deep_size_value(value, &mut state).size
}

fn deep_size_value(value: &DataValue, state: &mut TraversalState) -> SizeInfo {
    // Dereference pointers and boxes first. The pointer slot itself is
    // one word; the target contributes on top of it, once per address.
    match value {
        DataValue::Ref(None) => return SizeInfo::default(),
        DataValue::Ref(Some(target)) => {
            let addr = Arc::as_ptr(target) as usize;
            if !state.visited.insert(addr) {
                return SizeInfo::default();
            }
            let target = target.read();
            let mut info = deep_size_value(&target, state);
            info.size += mem::size_of::<usize>();
            return info;
        }
        DataValue::Boxed(target) => {
            let addr = target.as_ref() as *const DataValue as usize;
            if !state.visited.insert(addr) {
                return SizeInfo::default();
            }
            let mut info = deep_size_value(target, state);
            info.size += mem::size_of::<usize>();
            return info;
        }
        _ => {}
    }

    let mut info = SizeInfo {
        size: value.kind().memory_width(),
        is_variable: false,
    };

    match value {
        DataValue::Struct(v) => {
            if let Some(&cached) = state.struct_sizes.get(v.ident()) {
                return SizeInfo {
                    size: cached,
                    is_variable: false,
                };
            }

            for field in v.fields() {
                let field_info = deep_size_value(field, state);
                info.size += field_info.size;
                info.is_variable = info.is_variable || field_info.is_variable;
            }

            if !info.is_variable {
                trace!("caching fixed-size struct {}: {} bytes", v.ident(), info.size);
                state.struct_sizes.insert(v.ident().to_string(), info.size);
            }
        }

        DataValue::List(items) => {
            info.is_variable = true;
            if !items.is_empty() {
                // One probe decides the element shape; identical
                // fixed-size elements need no per-element walk.
                let elem_info = deep_size_value(&items[0], state);
                if !elem_info.is_variable {
                    info.size += elem_info.size * items.len();
                } else {
                    for item in items {
                        info.size += deep_size_value(item, state).size;
                    }
                }
            }
        }

        DataValue::Map(entries) => {
            info.is_variable = true;
            if let Some((first_key, first_value)) = entries.first() {
                let key_info = deep_size_value(first_key, state);
                let value_info = deep_size_value(first_value, state);

                if !key_info.is_variable {
                    info.size += key_info.size * entries.len();
                }
                if !value_info.is_variable {
                    info.size += value_info.size * entries.len();
                }
                if key_info.is_variable || value_info.is_variable {
                    // The sampled pair is already retrieved; the rest of
                    // the iteration only re-walks the variable sides.
                    info.size += key_info.size + value_info.size;
                    for (entry_key, entry_value) in &entries[1..] {
                        if key_info.is_variable {
                            info.size += deep_size_value(entry_key, state).size;
                        }
                        if value_info.is_variable {
                            info.size += deep_size_value(entry_value, state).size;
                        }
                    }
                }
            }
        }

        DataValue::Array(items) => {
            if !items.is_empty() {
                let elem_info = deep_size_value(&items[0], state);
                // Length is static, so the array is only as variable as
                // its element shape.
                info.is_variable = elem_info.is_variable;
                if !elem_info.is_variable {
                    info.size += elem_info.size * items.len();
                } else {
                    for item in items {
                        info.size += deep_size_value(item, state).size;
                    }
                }
            }
        }

        DataValue::String(v) => {
            info.size += v.len();
            info.is_variable = true;
        }

        DataValue::Binary(v) => {
            info.size += v.len();
            info.is_variable = true;
        }

        // Fixed-width scalars: the shallow width is the whole story.
        _ => {}
    }

    info
}
