use crate::error::Result;

#[derive(Debug, Clone)]
pub enum HeaderKey {
    Authorization,
    ContentType,
}

impl HeaderKey {
    fn as_str(&self) -> &str {
        match self {
            HeaderKey::Authorization => "Authorization",
            HeaderKey::ContentType => "Content-Type",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone)]
pub struct Header {
    key: HeaderKey,
    value: String,
}

impl Header {
    pub fn new(key: HeaderKey, value: String) -> Self {
        Self { key, value }
    }
}

pub struct Client {
    cli: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self {
            cli: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, url: &str, headers: Vec<Header>) -> Result<Response> {
        let builder = Self::add_headers(self.cli.get(url), headers);
        Self::send(builder).await
    }

    pub async fn post(&self, url: &str, headers: Vec<Header>, body: String) -> Result<Response> {
        let builder = Self::add_headers(self.cli.post(url), headers);
        Self::send(builder.body(body)).await
    }

    pub async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> Result<Response> {
        Self::send(self.cli.post(url).form(params)).await
    }

    pub async fn put(&self, url: &str, headers: Vec<Header>, body: String) -> Result<Response> {
        let builder = Self::add_headers(self.cli.put(url), headers);
        Self::send(builder.body(body)).await
    }

    pub async fn delete(&self, url: &str, headers: Vec<Header>) -> Result<Response> {
        let builder = Self::add_headers(self.cli.delete(url), headers);
        Self::send(builder).await
    }

    async fn send(builder: reqwest::RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        Ok(Response {
            status: response.status().into(),
            body: response.text().await?,
        })
    }

    fn add_headers(
        mut builder: reqwest::RequestBuilder,
        headers: Vec<Header>,
    ) -> reqwest::RequestBuilder {
        for header in headers {
            builder = builder.header(header.key.as_str(), header.value.as_str());
        }

        builder
    }
}
