// Copyright 2025 eraflo
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

//! Backend-agnostic description of quad fills and the vertex data they produce.
//!
//! - **[`enums`]**: Anti-alias tiers, color precision, index strategies and the batch lifecycle.
//! - **[`flags`]**: Per-edge anti-aliasing flags.
//! - **[`vertex`]**: Vertex attribute formats and layout descriptors.

pub mod enums;
pub mod flags;
pub mod vertex;

pub use self::enums::*;
pub use self::flags::EdgeAaFlags;
pub use self::vertex::*;
