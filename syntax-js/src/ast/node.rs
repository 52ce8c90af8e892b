use crate::loc::Loc;
use ahash::HashMap;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;
use serde::Serializer;
use std::any::Any;
use std::any::TypeId;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

/// Typed associated data attached to a node by later analysis stages (e.g.
/// scope and binding handles). Keyed by type, one value per type.
#[derive(Default)]
pub struct NodeAssocData {
  // Bound to Send + Sync so trees can move across threads.
  map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl NodeAssocData {
  pub fn get<T: Any>(&self) -> Option<&T> {
    let t = TypeId::of::<T>();
    self.map.get(&t).map(|v| v.downcast_ref().unwrap())
  }

  pub fn set<T: Any + Send + Sync>(&mut self, v: T) {
    let t = TypeId::of::<T>();
    self.map.insert(t, Box::from(v));
  }

  pub fn remove<T: Any>(&mut self) -> Option<T> {
    let t = TypeId::of::<T>();
    self.map.remove(&t).map(|v| *v.downcast().unwrap())
  }
}

#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  // A location is not required to exist in the source; synthetic nodes use
  // Loc::UNKNOWN.
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
  #[drive(skip)]
  pub assoc: NodeAssocData,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      assoc: NodeAssocData::default(),
    }
  }

  /// Maps the syntax, keeping the location and associated data.
  pub fn map_stx<T: Drive + DriveMut, F: FnOnce(S) -> T>(self, f: F) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(f(*self.stx)),
      assoc: self.assoc,
    }
  }

  /// Wraps the node inside another node with the same loc, with syntax derived
  /// from the provided callback.
  pub fn wrap<T: Drive + DriveMut, F: FnOnce(Node<S>) -> T>(self, f: F) -> Node<T> {
    let loc = self.loc;
    let stx = f(self);
    Node::new(loc, stx)
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use crate::ast::node::NodeAssocData;

  #[test]
  fn test_node_assoc_data() {
    struct MyType(u32);
    let mut assoc = NodeAssocData::default();
    assoc.set(MyType(32));
    let v = assoc.get::<MyType>().unwrap();
    assert_eq!(v.0, 32);
    let taken = assoc.remove::<MyType>().unwrap();
    assert_eq!(taken.0, 32);
    assert!(assoc.get::<MyType>().is_none());
  }
}
