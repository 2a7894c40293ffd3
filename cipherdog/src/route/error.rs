use thiserror::Error;

use super::DataNode;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "We get some absent DataNodes=[{}] in routing result, please check the configuration of rule and data node.",
        join(.0)
    )]
    AbsentDataNodes(Vec<DataNode>),
}

fn join(nodes: &[DataNode]) -> String {
    nodes
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
