use reqwest::{Client as ReqwestClient, Response};

use super::requests::Query;

/// HTTP Tracker Client
pub struct Client {
    server_addr: std::net::SocketAddr,
    reqwest_client: ReqwestClient,
}

/// URL components in this context:
///
/// ```text
/// http://127.0.0.1:62304/announce?info_hash=%9C8B%22%13%E3%0B%FF%21%2B0%C3%60%D2o%9A%02%13d%22
/// \_____________________/\_______/ \__________________________________________________________/
///            |               |                                    |
///         base url          path                                query
/// ```
impl Client {
    pub fn new(server_addr: std::net::SocketAddr) -> Self {
        Self {
            server_addr,
            reqwest_client: reqwest::Client::builder().build().unwrap(),
        }
    }

    pub async fn announce(&self, query: &Query) -> Response {
        self.get(&format!("announce?{query}")).await
    }

    pub async fn announce_on(&self, path: &str, query: &Query) -> Response {
        self.get(&format!("{path}?{query}")).await
    }

    pub async fn announce_with_header(&self, query: &Query, key: &str, value: &str) -> Response {
        self.get_with_header(&format!("announce?{query}"), key, value).await
    }

    pub async fn get(&self, path: &str) -> Response {
        self.reqwest_client.get(self.build_url(path)).send().await.unwrap()
    }

    pub async fn get_with_header(&self, path: &str, key: &str, value: &str) -> Response {
        self.reqwest_client
            .get(self.build_url(path))
            .header(key, value)
            .send()
            .await
            .unwrap()
    }

    fn build_url(&self, path: &str) -> String {
        format!("http://{}/{path}", &self.server_addr)
    }
}
