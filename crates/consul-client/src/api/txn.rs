//! Transaction API.

use crate::client::ConsulClient;
use crate::error::{Error, Result};
use crate::options::QueryOptions;
use crate::request::RequestOptions;
use crate::types::{TxnOp, TxnResponse};

/// Transaction API client.
pub struct TxnApi {
    client: ConsulClient,
}

impl TxnApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Apply a list of operations atomically.
    ///
    /// A rolled-back transaction still answers with a [`TxnResponse`]
    /// whose `errors` name the failing operations; only transport and
    /// other HTTP failures surface as `Err`.
    pub async fn create(&self, ops: &[TxnOp], opts: &QueryOptions) -> Result<TxnResponse> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        match self.client.put_json("txn", ops, req).await {
            Ok(decoded) => decoded.into_typed(),
            Err(Error::HttpRequest { status: 409, body, status_text }) => {
                match serde_json::from_str::<TxnResponse>(&body) {
                    Ok(response) => Ok(response),
                    Err(_) => Err(Error::HttpRequest {
                        status: 409,
                        status_text,
                        body,
                    }),
                }
            }
            Err(err) => Err(err),
        }
    }
}
