use serde::Deserialize;
use serde::Serialize;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  /// A placeholder for nodes that were created synthetically and don't exist
  /// anywhere in source code.
  pub const UNKNOWN: Loc = Loc(0, 0);

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }
}

impl Add<usize> for Loc {
  type Output = Loc;

  fn add(self, rhs: usize) -> Self::Output {
    Loc(self.0 + rhs, self.1 + rhs)
  }
}

impl AddAssign<usize> for Loc {
  fn add_assign(&mut self, rhs: usize) {
    self.0 += rhs;
    self.1 += rhs;
  }
}
