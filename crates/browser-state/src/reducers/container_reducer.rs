use crate::actions::ContainerAction;
use crate::state::BrowserState;

pub fn reduce_container(mut state: BrowserState, action: &ContainerAction) -> BrowserState {
    match action {
        ContainerAction::AddContainer { container } => {
            state
                .containers
                .insert(container.context_id.clone(), container.clone());
        }
        ContainerAction::RemoveContainer { context_id } => {
            state.containers.remove(context_id);
        }
    }
    state
}
