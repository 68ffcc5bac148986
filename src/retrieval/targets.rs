//! Supported platform/stack targets the metadata is fanned out over

use crate::retrieval::types::PlatformStackTarget;

struct StackAndTargetPair {
    stacks: &'static [&'static str],
    target: &'static str,
}

static SUPPORTED_STACKS: [StackAndTargetPair; 2] = [
    StackAndTargetPair {
        stacks: &["io.buildpacks.stacks.jammy"],
        target: "jammy",
    },
    StackAndTargetPair {
        stacks: &["io.buildpacks.stacks.noble"],
        target: "noble",
    },
];

/// Operating systems with the architectures supported on each, in emission order
static SUPPORTED_PLATFORMS: [(&str, &[&str]); 1] = [("linux", &["amd64", "arm64"])];

/// Returns every supported target, ordered by OS, then architecture, then stack pair
pub fn supported_targets() -> Vec<PlatformStackTarget> {
    SUPPORTED_PLATFORMS
        .iter()
        .flat_map(|(os, arches)| {
            arches.iter().flat_map(move |arch| {
                SUPPORTED_STACKS.iter().map(move |pair| PlatformStackTarget {
                    stacks: pair.stacks.iter().map(|s| s.to_string()).collect(),
                    target: pair.target.to_string(),
                    os: os.to_string(),
                    arch: arch.to_string(),
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_targets_is_the_cross_product_in_stable_order() {
        let targets: Vec<(String, String, String)> = supported_targets()
            .into_iter()
            .map(|t| (t.os, t.arch, t.target))
            .collect();

        assert_eq!(
            targets,
            vec![
                ("linux".into(), "amd64".into(), "jammy".into()),
                ("linux".into(), "amd64".into(), "noble".into()),
                ("linux".into(), "arm64".into(), "jammy".into()),
                ("linux".into(), "arm64".into(), "noble".into()),
            ]
        );
    }

    #[test]
    fn supported_targets_carry_their_stack_ids() {
        let targets = supported_targets();
        assert_eq!(targets[0].stacks, vec!["io.buildpacks.stacks.jammy"]);
        assert_eq!(targets[1].stacks, vec!["io.buildpacks.stacks.noble"]);
    }
}
