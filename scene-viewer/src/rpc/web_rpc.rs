use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

use crate::engine::core::app_state::LifecycleState;
use crate::engine::core::frame_driver::FrameSet;
use crate::engine::loading::asset_tracker::AssetLoadTracker;
use crate::engine::loading::progress::{LoadProgress, LoadProgressEvent};
use crate::engine::poi::registry::{PoiError, PointOfInterestRegistry};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
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

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing queue towards the embedding page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Message bridge for a page embedding the viewer in an iframe.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(FrameSet::Controls),
            )
            .add_systems(
                Update,
                (notify_loading_progress, send_outgoing_messages)
                    .chain()
                    .in_set(FrameSet::Presentation),
            )
            .add_systems(OnEnter(LifecycleState::Ready), notify_scene_ready);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Browser callbacks push here; the schedule drains it.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Ownership moves to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

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
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut registry: ResMut<PointOfInterestRegistry>,
    tracker: Res<AssetLoadTracker>,
    state: Res<State<LifecycleState>>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("RPC request: {}", request.method);
                if let Some(response) =
                    handle_rpc_request(&request, &mut registry, tracker.progress(), *state.get())
                {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Answers one request. Requests without an id are handled but get no reply.
pub fn handle_rpc_request(
    request: &RpcRequest,
    registry: &mut PointOfInterestRegistry,
    progress: LoadProgress,
    state: LifecycleState,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_points_of_interest" => Ok(points_of_interest_json(registry)),
        "set_points_of_interest_visible" => {
            handle_set_points_of_interest_visible(&request.params, registry)
        }
        "set_point_position" => handle_set_point_position(&request.params, registry),
        "get_load_progress" => Ok(load_progress_json(progress, state)),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn position_json(anchor: Vec3) -> serde_json::Value {
    serde_json::json!({ "x": anchor.x, "y": anchor.y, "z": anchor.z })
}

fn points_of_interest_json(registry: &PointOfInterestRegistry) -> serde_json::Value {
    let points: Vec<serde_json::Value> = registry
        .iter()
        .map(|point| {
            serde_json::json!({
                "id": point.id,
                "position": position_json(point.anchor),
            })
        })
        .collect();

    serde_json::json!({
        "show_points": registry.show_points(),
        "points": points,
    })
}

fn load_progress_json(progress: LoadProgress, state: LifecycleState) -> serde_json::Value {
    serde_json::json!({
        "items_loaded": progress.items_loaded,
        "items_total": progress.items_total,
        "ratio": progress.ratio(),
        "percentage": progress.percentage_label(),
        "state": state.as_str(),
    })
}

fn handle_set_points_of_interest_visible(
    params: &serde_json::Value,
    registry: &mut PointOfInterestRegistry,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct VisibleParams {
        visible: bool,
    }

    let params = serde_json::from_value::<VisibleParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected boolean 'visible' parameter"))?;

    registry.set_show_points(params.visible);

    Ok(serde_json::json!({ "show_points": registry.show_points() }))
}

fn handle_set_point_position(
    params: &serde_json::Value,
    registry: &mut PointOfInterestRegistry,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct PositionParams {
        id: usize,
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
    }

    let params = serde_json::from_value::<PositionParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'id' and optional 'x', 'y', 'z'"))?;

    let current = registry.anchor(params.id)?;
    let requested = Vec3::new(
        params.x.unwrap_or(current.x),
        params.y.unwrap_or(current.y),
        params.z.unwrap_or(current.z),
    );
    let anchor = registry.set_anchor(params.id, requested)?;

    Ok(serde_json::json!({
        "id": params.id,
        "position": position_json(anchor),
    }))
}

fn notify_loading_progress(
    mut progress_events: EventReader<LoadProgressEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in progress_events.read() {
        rpc_interface.send_notification(
            "loading_progress",
            serde_json::json!({
                "url": event.url,
                "items_loaded": event.progress.items_loaded,
                "items_total": event.progress.items_total,
                "ratio": event.progress.ratio(),
                "percentage": event.progress.percentage_label(),
            }),
        );
    }
}

fn notify_scene_ready(mut rpc_interface: ResMut<WebRpcInterface>, time: Res<Time>) {
    rpc_interface.send_notification(
        "scene_ready",
        serde_json::json!({ "elapsed_ms": time.elapsed().as_millis() as u64 }),
    );
}

fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Posts to the embedding window. Nothing is sent outside wasm.
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
        let _ = message;
    }
}

impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

impl From<PoiError> for RpcError {
    fn from(err: PoiError) -> Self {
        Self::invalid_params(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(1)),
        }
    }

    fn call(registry: &mut PointOfInterestRegistry, method: &str, params: serde_json::Value) -> RpcResponse {
        handle_rpc_request(
            &request(method, params),
            registry,
            LoadProgress::new(2, 4),
            LifecycleState::Transitioning,
        )
        .expect("requests with an id get a response")
    }

    #[test]
    fn lists_points_in_id_order() {
        let mut registry = PointOfInterestRegistry::default();
        let response = call(&mut registry, "get_points_of_interest", json!({}));
        let result = response.result.expect("result");

        assert_eq!(result["show_points"], json!(true));
        let ids: Vec<u64> = result["points"]
            .as_array()
            .expect("points array")
            .iter()
            .filter_map(|point| point["id"].as_u64())
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn toggles_show_flag() {
        let mut registry = PointOfInterestRegistry::default();
        let response = call(
            &mut registry,
            "set_points_of_interest_visible",
            json!({ "visible": false }),
        );
        assert_eq!(response.result, Some(json!({ "show_points": false })));
        assert!(!registry.show_points());
    }

    #[test]
    fn position_edits_are_clamped() {
        let mut registry = PointOfInterestRegistry::default();
        let response = call(
            &mut registry,
            "set_point_position",
            json!({ "id": 1, "x": 9.0, "y": 1.234 }),
        );
        assert!(response.error.is_none());

        let anchor = registry.anchor(1).expect("point 1 exists");
        assert_eq!(anchor.x, 5.0);
        assert!((anchor.y - 1.23).abs() < 1e-5);
        assert!((anchor.z + 2.87).abs() < 1e-5);

        let result = response.result.expect("result");
        assert_eq!(result["id"], json!(1));
        assert_eq!(result["position"]["x"], json!(5.0));
    }

    #[test]
    fn unknown_point_is_invalid_params() {
        let mut registry = PointOfInterestRegistry::default();
        let response = call(&mut registry, "set_point_position", json!({ "id": 7, "x": 1.0 }));
        assert_eq!(response.error.map(|error| error.code), Some(-32602));
    }

    #[test]
    fn malformed_params_are_invalid_params() {
        let mut registry = PointOfInterestRegistry::default();
        let response = call(
            &mut registry,
            "set_points_of_interest_visible",
            json!({ "visible": "yes" }),
        );
        assert_eq!(response.error.map(|error| error.code), Some(-32602));
    }

    #[test]
    fn unknown_method_is_not_found() {
        let mut registry = PointOfInterestRegistry::default();
        let response = call(&mut registry, "get_fps", json!({}));
        let error = response.error.expect("error");
        assert_eq!(error.code, -32601);
        assert_eq!(error.data, Some(json!({ "method": "get_fps" })));
    }

    #[test]
    fn load_progress_reports_state() {
        let mut registry = PointOfInterestRegistry::default();
        let response = call(&mut registry, "get_load_progress", json!(null));
        assert_eq!(
            response.result,
            Some(json!({
                "items_loaded": 2,
                "items_total": 4,
                "ratio": 0.5,
                "percentage": "50 %",
                "state": "transitioning",
            }))
        );
    }

    #[test]
    fn notifications_get_no_response() {
        let mut registry = PointOfInterestRegistry::default();
        let mut notification = request("set_points_of_interest_visible", json!({ "visible": false }));
        notification.id = None;

        let response = handle_rpc_request(
            &notification,
            &mut registry,
            LoadProgress::default(),
            LifecycleState::Loading,
        );
        assert!(response.is_none());
        assert!(!registry.show_points());
    }

    #[test]
    fn params_may_be_omitted() {
        let parsed: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_load_progress","id":3}"#)
                .expect("valid request");
        assert!(parsed.params.is_null());
    }
}
