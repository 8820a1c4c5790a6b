//! Property-based tests for the stat block extractor
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `stat_block_props`: Tests for whole-block extraction
//!   - Parsing the same block twice yields the same record
//!   - Ability scores keep their column order
//!   - Damage lists keep their source order
//!   - Speed modes keep their source order, one key per mode
//!   - Absent optional labels never count as failures

mod stat_block_props;
