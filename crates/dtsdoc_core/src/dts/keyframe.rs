//! Default node pose and the shared keyframe arrays referenced by sequences.

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::dts::{Lane, Lanes, Result, ShapeCounts};

/// Rest pose, one rotation and translation per node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefaultPose {
	/// Default node rotations.
	pub rotations: Vec<Quat>,
	/// Default node translations.
	pub translations: Vec<Vec3>,
}

/// Node rotation and translation keyframes (all sequences).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeKeys {
	/// Rotation keyframes.
	pub rotations: Vec<Quat>,
	/// Translation keyframes.
	pub translations: Vec<Vec3>,
}

/// Node scale keyframes (all sequences).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScaleKeys {
	/// Uniform scale factors.
	pub uniform: Vec<f32>,
	/// Per-axis scale factors.
	pub aligned: Vec<Vec3>,
	/// Arbitrary-axis scale factors.
	pub arbitrary_factors: Vec<Vec3>,
	/// Arbitrary-axis scale orientations.
	pub arbitrary_rotations: Vec<Quat>,
}

/// Ground transform keyframes (all sequences).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroundKeys {
	/// Ground translations.
	pub translations: Vec<Vec3>,
	/// Ground rotations.
	pub rotations: Vec<Quat>,
}

/// Per-object animated state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObjectState {
	/// Visibility in `[0, 1]`.
	pub visibility: f32,
	/// Vertex keyframe index.
	pub frame: i32,
	/// UV keyframe index.
	pub mat_frame: i32,
}

/// Sequence trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trigger {
	/// Raw state word: trigger number plus on/invert flag bits.
	pub state: u32,
	/// Position within the sequence, `[0, 1]`.
	pub pos: f32,
}

impl Trigger {
	/// Trigger turns its state on (off otherwise).
	pub const STATE_ON: u32 = 1 << 31;
	/// Trigger flips its meaning when the sequence plays backwards.
	pub const INVERT_ON_REVERSE: u32 = 1 << 30;

	/// Trigger number with flag bits masked off.
	pub fn number(&self) -> u32 {
		self.state & (Self::INVERT_ON_REVERSE - 1)
	}

	/// Whether the trigger switches its state on.
	pub fn is_on(&self) -> bool {
		self.state & Self::STATE_ON != 0
	}

	/// Whether the trigger inverts on reverse playback.
	pub fn inverts_on_reverse(&self) -> bool {
		self.state & Self::INVERT_ON_REVERSE != 0
	}
}

/// Every keyframe array of the shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Keyframes {
	/// Node rotation/translation keys.
	pub nodes: NodeKeys,
	/// Node scale keys.
	pub scales: ScaleKeys,
	/// Ground transform keys.
	pub ground: GroundKeys,
	/// Object state keys.
	pub object_states: Vec<ObjectState>,
	/// Decal state keys (deprecated, raw).
	pub decal_states: Vec<i32>,
	/// Triggers.
	pub triggers: Vec<Trigger>,
}

/// Read default rotations and translations, then node rotation and translation keys.
pub fn read_node_section(lanes: &mut Lanes<'_>, counts: &ShapeCounts) -> Result<(DefaultPose, NodeKeys)> {
	let pose = DefaultPose {
		rotations: lanes.l16.read_quat16s(counts.nodes)?,
		translations: lanes.l32.read_vec3s(counts.nodes)?,
	};
	let keys = NodeKeys {
		rotations: lanes.l16.read_quat16s(counts.node_rotations)?,
		translations: lanes.l32.read_vec3s(counts.node_translations)?,
	};
	Ok((pose, keys))
}

/// Read uniform, aligned, and arbitrary scale keys.
pub fn read_scale_section(lanes: &mut Lanes<'_>, counts: &ShapeCounts) -> Result<ScaleKeys> {
	Ok(ScaleKeys {
		uniform: lanes.l32.read_f32s(counts.node_uniform_scales)?,
		aligned: lanes.l32.read_vec3s(counts.node_aligned_scales)?,
		arbitrary_factors: lanes.l32.read_vec3s(counts.node_arbitrary_scales)?,
		arbitrary_rotations: lanes.l16.read_quat16s(counts.node_arbitrary_scales)?,
	})
}

/// Read ground translations then ground rotations.
pub fn read_ground_section(lanes: &mut Lanes<'_>, count: usize) -> Result<GroundKeys> {
	Ok(GroundKeys {
		translations: lanes.l32.read_vec3s(count)?,
		rotations: lanes.l16.read_quat16s(count)?,
	})
}

/// Read `count` object states.
pub fn read_object_states(lane: &mut Lane<'_, u32>, count: usize) -> Result<Vec<ObjectState>> {
	lane.read_records(count, 3, |lane| {
		Ok(ObjectState {
			visibility: lane.read_f32()?,
			frame: lane.read_i32()?,
			mat_frame: lane.read_i32()?,
		})
	})
}

/// Read `count` raw decal states.
pub fn read_decal_states(lane: &mut Lane<'_, u32>, count: usize) -> Result<Vec<i32>> {
	lane.read_i32s(count)
}

/// Read `count` triggers.
pub fn read_triggers(lane: &mut Lane<'_, u32>, count: usize) -> Result<Vec<Trigger>> {
	lane.read_records(count, 2, |lane| {
		Ok(Trigger {
			state: lane.read()?,
			pos: lane.read_f32()?,
		})
	})
}
