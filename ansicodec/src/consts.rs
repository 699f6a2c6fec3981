//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

/// Escape
pub const ESC: u8 = 0x1B;

/// Maximum length of a candidate SGR sequence in bytes, including `ESC [` and `m`.
///
/// A candidate that grows past this limit is not treated as SGR and is passed
/// through as literal text. This also bounds the tail the scanner holds back
/// between chunks.
pub const MAX_SEQUENCE_LENGTH: usize = 256;
