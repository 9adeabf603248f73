//! Synchronized scrolling between independently scrollable surfaces.
//!
//! Surfaces move together by relative position: a surface scrolled to 40% of
//! its scrollable range puts every other surface at 40% of theirs.
//!
//! The group is driven by two calls from the display loop:
//!
//! 1. [`ScrollSyncGroup::on_scroll`] for every scroll notification. This only
//!    records the new percentage; bursts of notifications within one frame
//!    collapse into a single pending sync.
//! 2. [`ScrollSyncGroup::on_frame`] once per rendering tick. This applies the
//!    pending percentage to the other surfaces and returns the moves to
//!    perform.
//!
//! A programmatic move produces its own scroll notification, usually after
//! the move has been rendered. Moved surfaces are therefore suppressed until
//! the following tick, and their notifications are swallowed instead of
//! bouncing the position back to the surface the user is scrolling.

use tracing::trace;


/// Identifies one surface within a [`ScrollSyncGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

impl SurfaceId {
	/// The editable Markdown source pane.
	pub const SOURCE: Self = Self(0);
	/// The rendered preview pane.
	pub const PREVIEW: Self = Self(1);
}

/// Vertical geometry of a scrollable surface, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
	pub offset: f32,
	pub content_height: f32,
	pub viewport_height: f32,
}

impl ScrollMetrics {
	pub fn new(offset: f32, content_height: f32, viewport_height: f32) -> Self {
		Self {
			offset,
			content_height,
			viewport_height,
		}
	}

	/// Distance the surface can scroll; zero when the content fits.
	pub fn range(&self) -> f32 {
		(self.content_height - self.viewport_height).max(0.0)
	}

	/// Position as a fraction of [`Self::range`], in `[0, 1]`.
	///
	/// A surface without overflow reports `0`.
	pub fn percentage(&self) -> f32 {
		let range = self.range();
		if range <= 0.0 || !range.is_finite() {
			return 0.0;
		}
		(self.offset / range).clamp(0.0, 1.0)
	}

	/// Offset that puts this surface at `percentage` of its range.
	pub fn offset_for(&self, percentage: f32) -> f32 {
		(percentage * self.range()).round()
	}
}

/// What [`ScrollSyncGroup::on_scroll`] did with a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
	/// A sync is now pending; the caller should request a frame.
	Scheduled,
	/// A sync was already pending and now uses the newer position.
	Coalesced,
	/// Echo of a programmatic move; ignored.
	Suppressed,
	/// The surface is unknown or has nothing to sync with.
	Unsynced,
}

/// A programmatic scroll the display surface must perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
	pub surface: SurfaceId,
	pub offset: f32,
}

#[derive(Debug, Clone)]
struct Member {
	id: SurfaceId,
	metrics: ScrollMetrics,
	/// Frame on which this surface was last moved programmatically.
	suppressed_since: Option<u64>,
}

#[derive(Debug, Clone, Copy)]
struct PendingSync {
	source: SurfaceId,
	percentage: f32,
}

/// A set of surfaces kept at the same relative scroll position.
#[derive(Debug, Clone, Default)]
pub struct ScrollSyncGroup {
	members: Vec<Member>,
	pending: Option<PendingSync>,
	last_percentage: Option<f32>,
	frame: u64,
}

impl ScrollSyncGroup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a surface, or replaces the metrics of one already present.
	pub fn register(&mut self, id: SurfaceId, metrics: ScrollMetrics) {
		match self.member_mut(id) {
			Some(member) => member.metrics = metrics,
			None => self.members.push(Member {
				id,
				metrics,
				suppressed_since: None,
			}),
		}
	}

	/// Updates content or viewport size without treating it as a scroll.
	pub fn update_metrics(&mut self, id: SurfaceId, content_height: f32, viewport_height: f32) {
		if let Some(member) = self.member_mut(id) {
			member.metrics.content_height = content_height;
			member.metrics.viewport_height = viewport_height;
		}
	}

	pub fn metrics(&self, id: SurfaceId) -> Option<ScrollMetrics> {
		self.members.iter().find(|member| member.id == id).map(|member| member.metrics)
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	/// Percentage of the most recent user scroll.
	pub fn last_percentage(&self) -> Option<f32> {
		self.last_percentage
	}

	/// Whether the display loop must keep delivering frames.
	pub fn needs_frame(&self) -> bool {
		self.pending.is_some() || self.members.iter().any(|member| member.suppressed_since.is_some())
	}

	/// Records a scroll notification from surface `id`.
	pub fn on_scroll(&mut self, id: SurfaceId, offset: f32) -> ScrollOutcome {
		let synced = self.members.len() > 1;
		let Some(member) = self.member_mut(id) else {
			return ScrollOutcome::Unsynced;
		};

		member.metrics.offset = offset;
		if member.suppressed_since.is_some() {
			trace!(surface = id.0, offset, "suppressed scroll echo");
			return ScrollOutcome::Suppressed;
		}
		if !synced {
			return ScrollOutcome::Unsynced;
		}

		let percentage = member.metrics.percentage();
		self.last_percentage = Some(percentage);

		let outcome = if self.pending.is_some() {
			ScrollOutcome::Coalesced
		} else {
			ScrollOutcome::Scheduled
		};
		self.pending = Some(PendingSync { source: id, percentage });
		outcome
	}

	/// Runs one rendering tick.
	///
	/// Surfaces moved on the previous tick stop being suppressed, then any
	/// pending sync is applied to every surface except its source.
	pub fn on_frame(&mut self) -> Vec<ScrollCommand> {
		self.frame += 1;
		let frame = self.frame;

		for member in &mut self.members {
			if member.suppressed_since.is_some_and(|since| since < frame) {
				member.suppressed_since = None;
			}
		}

		let Some(pending) = self.pending.take() else {
			return Vec::new();
		};

		let commands: Vec<ScrollCommand> = self
			.members
			.iter_mut()
			.filter(|member| member.id != pending.source)
			.map(|member| {
				let offset = member.metrics.offset_for(pending.percentage);
				member.metrics.offset = offset;
				member.suppressed_since = Some(frame);
				ScrollCommand { surface: member.id, offset }
			})
			.collect();

		trace!(
			source = pending.source.0,
			percentage = pending.percentage,
			moved = commands.len(),
			"scroll sync applied"
		);
		commands
	}

	fn member_mut(&mut self, id: SurfaceId) -> Option<&mut Member> {
		self.members.iter_mut().find(|member| member.id == id)
	}
}
