use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::scene::catalog::SceneCatalog;
use crate::tools::interaction::{
    GoHomeEvent, InputMode, InteractionSource, SelectEntityEvent, SetModeEvent,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the embedding
/// page and the scene. Handles both request-response patterns and
/// notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the RPC layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Attempt JSON parsing to validate RPC format before queuing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    catalog: Res<SceneCatalog>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut select_events: EventWriter<SelectEntityEvent>,
    mut go_home_events: EventWriter<GoHomeEvent>,
    mut mode_events: EventWriter<SetModeEvent>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let response = handle_rpc_request(
                    &request,
                    &diagnostics,
                    &catalog,
                    &mut select_events,
                    &mut go_home_events,
                    &mut mode_events,
                );
                if let Some(response) = response {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Handle an individual RPC request and generate a response by method.
fn handle_rpc_request(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    catalog: &SceneCatalog,
    select_events: &mut EventWriter<SelectEntityEvent>,
    go_home_events: &mut EventWriter<GoHomeEvent>,
    mode_events: &mut EventWriter<SetModeEvent>,
) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "select_entity" => handle_select_entity(&request.params, catalog, select_events),
        "go_home" => handle_go_home(go_home_events),
        "set_mode" => handle_set_mode(&request.params, mode_events),
        "describe_entity" => handle_describe_entity(&request.params, catalog),
        "get_fps" => handle_get_fps(diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

#[derive(serde::Deserialize)]
struct EntityIdParams {
    id: String,
}

/// Focus a body by identifier. The live world position is resolved by the
/// selection system, so an orbiting body focuses where it currently is.
fn handle_select_entity(
    params: &serde_json::Value,
    catalog: &SceneCatalog,
    select_events: &mut EventWriter<SelectEntityEvent>,
) -> Result<serde_json::Value, RpcError> {
    let entity_params = serde_json::from_value::<EntityIdParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;

    let id = catalog
        .resolve_id(&entity_params.id)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown entity: {}", entity_params.id)))?;

    select_events.write(SelectEntityEvent {
        id,
        world_position: None,
        source: InteractionSource::Rpc,
    });

    info!("Selection event dispatched for {id}");

    Ok(serde_json::json!({
        "success": true,
        "selected": id
    }))
}

fn handle_go_home(
    go_home_events: &mut EventWriter<GoHomeEvent>,
) -> Result<serde_json::Value, RpcError> {
    go_home_events.write(GoHomeEvent {
        source: InteractionSource::Rpc,
    });
    Ok(serde_json::json!({ "success": true }))
}

fn handle_set_mode(
    params: &serde_json::Value,
    mode_events: &mut EventWriter<SetModeEvent>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct SetModeParams {
        mode: String,
    }

    let mode_params = serde_json::from_value::<SetModeParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'mode' parameter"))?;

    let mode = InputMode::from_string(&mode_params.mode)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown mode: {}", mode_params.mode)))?;

    mode_events.write(SetModeEvent {
        mode,
        source: InteractionSource::Rpc,
    });

    Ok(serde_json::json!({
        "success": true,
        "mode": mode.to_string()
    }))
}

/// Total description lookup: unknown ids answer the default record rather
/// than an error.
fn handle_describe_entity(
    params: &serde_json::Value,
    catalog: &SceneCatalog,
) -> Result<serde_json::Value, RpcError> {
    let entity_params = serde_json::from_value::<EntityIdParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;

    let info = catalog.describe(&entity_params.id);
    serde_json::to_value(info).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the embedding page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window (the embedding page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_requests_parse_from_frontend_json() {
        let request: RpcRequest = serde_json::from_str(
            r#"{"jsonrpc":"2.0","method":"select_entity","params":{"id":"planetBlue"},"id":1}"#,
        )
        .unwrap();
        assert_eq!(request.method, "select_entity");
        assert_eq!(request.params["id"], "planetBlue");
    }

    #[test]
    fn notifications_queue_until_flushed() {
        let mut interface = WebRpcInterface::default();
        interface.send_notification("mode_changed", serde_json::json!({"mode": "fixed"}));
        assert_eq!(interface.outgoing_notifications.len(), 1);
        assert_eq!(interface.outgoing_notifications[0].jsonrpc, "2.0");
    }
}
