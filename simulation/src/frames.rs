//! Frame capture for search playback
//!
//! [`FrameRecorder`] hooks into the search engine's visit callback and
//! keeps one text snapshot per newly visited peer. Frames can be written
//! out one file each, or assembled into a single animation file.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use seeker_core::{PeerId, Topology};
use seeker_search::VisitObserver;
use tracing::debug;

use crate::render;

/// A single captured step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    pub current: PeerId,
    pub visited: BTreeSet<PeerId>,
    pub text: String,
}

/// Records a snapshot every time the engine visits a new peer
#[derive(Debug)]
pub struct FrameRecorder<'t> {
    topology: &'t Topology,
    frames: Vec<Frame>,
}

impl<'t> FrameRecorder<'t> {
    pub fn new(topology: &'t Topology) -> Self {
        Self {
            topology,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Write each frame to `dir/frame_NNN.txt`, returning the paths
    pub fn write_frames(&self, dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut paths = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            let path = dir.join(format!("frame_{:03}.txt", frame.index));
            fs::write(&path, &frame.text)?;
            paths.push(path);
        }
        debug!(count = paths.len(), dir = ?dir, "Wrote frames");
        Ok(paths)
    }

    /// Assemble all frames, in order, into one file
    pub fn write_animation(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.animation())
    }

    /// All frames joined with numbered headers
    pub fn animation(&self) -> String {
        let mut output = String::new();
        for frame in &self.frames {
            output.push_str(&format!("=== frame {} ===\n", frame.index));
            output.push_str(&frame.text);
            output.push('\n');
        }
        output
    }
}

impl VisitObserver for FrameRecorder<'_> {
    fn on_visit(&mut self, visited: &BTreeSet<PeerId>, current: &PeerId) {
        let index = self.frames.len();
        self.frames.push(Frame {
            index,
            current: current.clone(),
            visited: visited.clone(),
            text: render::snapshot(self.topology, visited, current),
        });
    }
}
