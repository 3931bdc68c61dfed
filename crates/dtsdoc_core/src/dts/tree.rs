//! Parent/child view over the node table.
//!
//! The decoder keeps node links as raw indices. This module checks them and answers
//! hierarchy queries without building an owning tree.

use thiserror::Error;

use crate::dts::{Node, Shape};

/// Node link problems found while building a [`NodeTree`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
	/// A link is neither `-1` nor a valid node index.
	#[error("node {node} has {link} index {index} outside 0..{len}")]
	IndexOutOfRange {
		/// Node holding the link.
		node: usize,
		/// Link field name.
		link: &'static str,
		/// Stored index.
		index: i32,
		/// Node table length.
		len: usize,
	},
	/// Parent links or a sibling chain loop back on themselves.
	#[error("node links form a cycle at node {node}")]
	Cycle {
		/// A node on (or cut off by) the cycle.
		node: usize,
	},
}

/// Validated hierarchy over a shape's nodes.
///
/// Children are grouped by parent index in table order.
#[derive(Debug, Clone)]
pub struct NodeTree<'a> {
	nodes: &'a [Node],
	roots: Vec<usize>,
	children: Vec<Vec<usize>>,
}

impl<'a> NodeTree<'a> {
	/// Build the tree for `shape`'s node table.
	pub fn build(shape: &'a Shape) -> Result<Self, TreeError> {
		Self::from_nodes(&shape.nodes)
	}

	/// Build the tree for a bare node table.
	pub fn from_nodes(nodes: &'a [Node]) -> Result<Self, TreeError> {
		let len = nodes.len();
		let mut roots = Vec::new();
		let mut children = vec![Vec::new(); len];

		for (index, node) in nodes.iter().enumerate() {
			for (link, value) in [("parent", node.parent), ("first_child", node.first_child), ("next_sibling", node.next_sibling)] {
				check_link(index, link, value, len)?;
			}
			match link_index(node.parent) {
				Some(parent) => children[parent].push(index),
				None => roots.push(index),
			}
		}

		for (index, node) in nodes.iter().enumerate() {
			let mut steps = 0;
			let mut next = link_index(node.first_child);
			while let Some(child) = next {
				steps += 1;
				if steps > len {
					return Err(TreeError::Cycle { node: index });
				}
				next = link_index(nodes[child].next_sibling);
			}
		}

		let tree = Self { nodes, roots, children };
		let mut reached = vec![false; len];
		for (_, index) in tree.walk() {
			reached[index] = true;
		}
		if let Some(node) = reached.iter().position(|seen| !seen) {
			return Err(TreeError::Cycle { node });
		}
		Ok(tree)
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the node table is empty.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Nodes without a parent, in table order.
	pub fn roots(&self) -> &[usize] {
		&self.roots
	}

	/// Direct children of `index`, in table order.
	pub fn children(&self, index: usize) -> &[usize] {
		self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Parent of `index`, `None` for roots.
	pub fn parent(&self, index: usize) -> Option<usize> {
		self.nodes.get(index).and_then(|node| link_index(node.parent))
	}

	/// Chain from the root down to `index`, inclusive.
	pub fn path_to(&self, index: usize) -> Vec<usize> {
		let mut path = vec![index];
		let mut current = index;
		while let Some(parent) = self.parent(current) {
			path.push(parent);
			current = parent;
		}
		path.reverse();
		path
	}

	/// Depth-first pre-order traversal yielding `(depth, index)`.
	pub fn walk(&self) -> Walk<'_> {
		Walk {
			tree: self,
			stack: self.roots.iter().rev().map(|&root| (0, root)).collect(),
		}
	}
}

/// Iterator returned by [`NodeTree::walk`].
pub struct Walk<'t> {
	tree: &'t NodeTree<'t>,
	stack: Vec<(usize, usize)>,
}

impl Iterator for Walk<'_> {
	type Item = (usize, usize);

	fn next(&mut self) -> Option<Self::Item> {
		let (depth, index) = self.stack.pop()?;
		for &child in self.tree.children(index).iter().rev() {
			self.stack.push((depth + 1, child));
		}
		Some((depth, index))
	}
}

fn link_index(value: i32) -> Option<usize> {
	usize::try_from(value).ok()
}

fn check_link(node: usize, link: &'static str, index: i32, len: usize) -> Result<(), TreeError> {
	if index == -1 || link_index(index).is_some_and(|value| value < len) {
		return Ok(());
	}
	Err(TreeError::IndexOutOfRange { node, link, index, len })
}
