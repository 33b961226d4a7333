use crate::state::ContainerState;

#[derive(Debug, Clone)]
pub enum ContainerAction {
    AddContainer { container: ContainerState },
    RemoveContainer { context_id: String },
}
