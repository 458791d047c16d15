// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera enumeration
//!
//! Cameras are discovered by parsing `pw-cli ls Node`. The libcamera location
//! property is not part of that listing, so it is read per node from
//! `pw-cli info <id>`.

use super::types::CameraDevice;
use tracing::{debug, info, warn};

/// Enumerate cameras using PipeWire.
///
/// Falls back to a single auto-selected device when PipeWire is reachable
/// but `pw-cli` is not. Returns `None` when PipeWire cannot be used at all.
pub fn enumerate_cameras() -> Option<Vec<CameraDevice>> {
    debug!("Enumerating cameras via PipeWire");

    if let Err(e) = gstreamer::init() {
        warn!(error = %e, "GStreamer init failed");
        return None;
    }

    if gstreamer::ElementFactory::find("pipewiresrc").is_none() {
        warn!("pipewiresrc not available");
        return None;
    }

    let Some(listing) = run_pw_cli(&["ls", "Node"]) else {
        info!("pw-cli unavailable, using PipeWire auto-selection");
        return Some(vec![CameraDevice::default_device()]);
    };

    let mut cameras: Vec<CameraDevice> = parse_node_listing(&listing)
        .into_iter()
        .map(|node| {
            let location = run_pw_cli(&["info", &node.id])
                .and_then(|details| find_property(&details, "api.libcamera.location"));
            debug!(id = %node.id, name = %node.name, ?location, "Found video camera");
            CameraDevice {
                name: node.name,
                path: node.target,
                location,
            }
        })
        .collect();

    if cameras.is_empty() {
        info!("No cameras listed by pw-cli, using PipeWire auto-selection");
        cameras.push(CameraDevice::default_device());
    }

    debug!(count = cameras.len(), "Enumerated cameras");
    Some(cameras)
}

/// A `Video/Source` node from `pw-cli ls Node`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VideoNode {
    pub id: String,
    pub name: String,
    /// Target string understood by the pipeline builder
    pub target: String,
}

#[derive(Default)]
struct NodeBuilder {
    id: Option<String>,
    serial: Option<String>,
    description: Option<String>,
    nick: Option<String>,
    is_video_source: bool,
}

impl NodeBuilder {
    fn finish(self) -> Option<VideoNode> {
        if !self.is_video_source {
            return None;
        }
        let id = self.id?;
        let name = self.description.or(self.nick)?;
        // object.serial is stable across node re-creation, prefer it
        let target = match self.serial {
            Some(serial) => format!("pipewire-serial-{}", serial),
            None => format!("pipewire-{}", id),
        };
        Some(VideoNode { id, name, target })
    }
}

/// Parse the output of `pw-cli ls Node` into video source nodes
pub(crate) fn parse_node_listing(listing: &str) -> Vec<VideoNode> {
    let mut nodes = Vec::new();
    let mut current: Option<NodeBuilder> = None;

    for line in listing.lines() {
        let trimmed = line.trim();

        // "id 76, type PipeWire:Interface:Node/3"
        if let Some(rest) = trimmed.strip_prefix("id ")
            && trimmed.contains("type PipeWire:Interface:Node")
        {
            if let Some(node) = current.take().and_then(NodeBuilder::finish) {
                nodes.push(node);
            }
            let id = rest.split(',').next().unwrap_or_default().trim().to_string();
            current = Some(NodeBuilder {
                id: Some(id),
                ..NodeBuilder::default()
            });
            continue;
        }

        let Some(node) = current.as_mut() else {
            continue;
        };

        if trimmed.starts_with("media.class") && trimmed.contains("\"Video/Source\"") {
            node.is_video_source = true;
        } else if trimmed.starts_with("object.serial") {
            node.serial = extract_quoted_value(trimmed);
        } else if trimmed.starts_with("node.description") {
            node.description = extract_quoted_value(trimmed);
        } else if trimmed.starts_with("node.nick") {
            node.nick = extract_quoted_value(trimmed);
        }
    }

    if let Some(node) = current.and_then(NodeBuilder::finish) {
        nodes.push(node);
    }

    nodes
}

/// Find `key = "value"` in pw-cli output
pub(crate) fn find_property(output: &str, key: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .map(|line| line.trim_start_matches('*').trim_start())
        .find(|line| {
            line.strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .and_then(extract_quoted_value)
}

/// Extract quoted value from a property line (`key = "value"` -> `value`)
fn extract_quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')?;
    Some(line[start + 1..start + 1 + end].to_string())
}

fn run_pw_cli(args: &[&str]) -> Option<String> {
    let output = std::process::Command::new("pw-cli").args(args).output().ok()?;
    if !output.status.success() {
        debug!(?args, "pw-cli command failed");
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
	id 31, type PipeWire:Interface:Node/3
 		object.serial = "31"
 		factory.id = "10"
 		node.description = "Built-in Audio"
 		node.name = "alsa_output.pci"
 		media.class = "Audio/Sink"
	id 62, type PipeWire:Interface:Node/3
 		object.serial = "2146"
 		node.description = "imx258 (libcamera)"
 		node.nick = "imx258"
 		media.class = "Video/Source"
	id 64, type PipeWire:Interface:Node/3
 		node.nick = "Integrated Webcam"
 		media.class = "Video/Source"
"#;

    #[test]
    fn test_parse_only_video_sources() {
        let nodes = parse_node_listing(LISTING);
        assert_eq!(nodes.len(), 2);

        assert_eq!(nodes[0].id, "62");
        assert_eq!(nodes[0].name, "imx258 (libcamera)");
        assert_eq!(nodes[0].target, "pipewire-serial-2146");

        // No serial and no description: node ID target, nick as name
        assert_eq!(nodes[1].id, "64");
        assert_eq!(nodes[1].name, "Integrated Webcam");
        assert_eq!(nodes[1].target, "pipewire-64");
    }

    #[test]
    fn test_find_property_in_info_output() {
        let info = r#"
	id: 62
	properties:
*		api.libcamera.location = "back"
 		api.libcamera.rotation = "90"
"#;
        assert_eq!(
            find_property(info, "api.libcamera.location"),
            Some("back".to_string())
        );
        assert_eq!(find_property(info, "api.libcamera"), None);
        assert_eq!(find_property(info, "node.name"), None);
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_node_listing("").is_empty());
    }
}
