//! 通知推送的 WebSocket 端点。
//!
//! 浏览器的 WebSocket API 设不了请求头，token 走查询参数。
//! 连接只下行：服务端推送通知 JSON，客户端发来的帧只用于探测断连。

use std::time::Duration;

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::info;

use domain::UserId;

use crate::{error::ApiError, state::AppState};

/// 慢客户端的单帧写超时，超时即断开，由 hub 的注销逻辑收尾。
const WRITE_DEADLINE: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    token: String,
}

pub async fn notifications_ws(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let claims = state.jwt_service.verify_token(&query.token)?;
    let user_id = UserId::from(claims.user_id);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)))
}

async fn handle_socket(socket: WebSocket, state: AppState, user_id: UserId) {
    let (mut sender, mut incoming) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    state.hub.register(user_id, tx.clone()).await;
    info!(%user_id, "notification channel opened");

    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            let write = sender.send(WsMessage::Text(payload.into()));
            match tokio::time::timeout(WRITE_DEADLINE, write).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) | Err(_) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = incoming.next().await {
            if matches!(message, WsMessage::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    // 只注销自己那一路，晚到的清理不能挤掉重连后的新通道
    state.hub.unregister(user_id, &tx).await;
    info!(%user_id, "notification channel closed");
}
