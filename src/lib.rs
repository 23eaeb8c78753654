// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Chess move legality by board simulation.
//!
//! A `Board` owns its pieces and answers whether a move is legal by
//! playing it on a throwaway copy and looking for attacks on the king.
//! A `Game` adds an identity and a move history on top of a board.

mod board;
mod game;

pub use board::*;
pub use game::*;
