use extproj_handlers::{Collision, ExtensionRegistry};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandlerInfo {
    pub name: String,
    /// Extensions this handler actually owns (contested ones it lost are left out).
    pub extensions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandlersReport {
    pub handlers: Vec<HandlerInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<Collision>,
}

/// Registered handlers in registration order.
pub fn list_handlers(registry: &ExtensionRegistry) -> HandlersReport {
    let handlers = registry
        .registrations()
        .iter()
        .map(|reg| HandlerInfo {
            name: reg.name.to_string(),
            extensions: registry
                .extensions()
                .filter(|(_, owner)| *owner == reg.name)
                .map(|(ext, _)| ext.to_string())
                .collect(),
        })
        .collect();
    HandlersReport {
        handlers,
        collisions: registry.collisions().to_vec(),
    }
}
