use crate::domain::ports::ReplyChannel;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use zeromq::{RepSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

/// A bound ZeroMQ REP socket. The socket itself enforces receive/reply alternation.
pub struct ZmqReplyChannel {
    socket: RepSocket,
    endpoint: String,
}

impl ZmqReplyChannel {
    /// Binds the reply endpoint. Failure here is fatal for the service.
    pub async fn bind(endpoint: &str) -> Result<Self> {
        let mut socket = RepSocket::new();
        let bound = socket
            .bind(&bindable_endpoint(endpoint))
            .await
            .map_err(|source| ServiceError::BindError {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Ok(Self {
            socket,
            endpoint: bound.to_string(),
        })
    }

    /// The resolved endpoint, with the real port when bound to port 0.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// `tcp://*:port` is the libzmq spelling of "all interfaces"; the socket only resolves
/// concrete hosts, so map the wildcard to `0.0.0.0`.
pub fn bindable_endpoint(endpoint: &str) -> String {
    match endpoint.strip_prefix("tcp://*:") {
        Some(port) => format!("tcp://0.0.0.0:{}", port),
        None => endpoint.to_string(),
    }
}

#[async_trait]
impl ReplyChannel for ZmqReplyChannel {
    async fn receive(&mut self) -> Result<Vec<u8>> {
        let message = self.socket.recv().await?;
        Ok(message
            .into_vec()
            .into_iter()
            .flat_map(|frame| frame.to_vec())
            .collect())
    }

    async fn reply(&mut self, payload: String) -> Result<()> {
        self.socket.send(ZmqMessage::from(payload)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_host_is_rewritten() {
        assert_eq!(bindable_endpoint("tcp://*:5555"), "tcp://0.0.0.0:5555");
        assert_eq!(bindable_endpoint("tcp://127.0.0.1:5555"), "tcp://127.0.0.1:5555");
        assert_eq!(bindable_endpoint("ipc:///tmp/a.sock"), "ipc:///tmp/a.sock");
    }
}
