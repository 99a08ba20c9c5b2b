use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use url::Url;

/// consumer secret 的來源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretLocation {
    File(PathBuf),
    /// 以 `{base}/{consumer_key}/` 向 key server 取得
    KeyServer(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SignatureTransport {
    #[default]
    #[serde(rename = "header")]
    Header,
    #[serde(rename = "query")]
    #[cfg_attr(feature = "cli", value(name = "query"))]
    QueryString,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    #[serde(default)]
    pub pretty: bool,
    #[serde(default)]
    pub include_status: bool,
}

#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: String,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub form_body: Option<String>,
}

impl SignedRequest {
    /// dry run 時印出的請求內容
    pub fn describe(&self) -> String {
        let mut lines = vec![format!("{} {}", self.method, self.url)];
        for (name, value) in &self.headers {
            lines.push(format!("{}: {}", name, value));
        }
        if let Some(body) = &self.form_body {
            lines.push(String::new());
            lines.push(body.clone());
        }
        lines.join("\n")
    }
}

/// 回應內容保留原始位元組，不做任何字元集轉換
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ProbeResponse {
    /// 只有 `pretty` 且內容是合法 UTF-8 JSON 時才重新排版，其他情況原樣輸出
    pub fn render(&self, options: OutputOptions) -> Vec<u8> {
        let pretty = if options.pretty {
            serde_json::from_slice::<serde_json::Value>(&self.body)
                .ok()
                .and_then(|value| serde_json::to_vec_pretty(&value).ok())
        } else {
            None
        };
        let body = pretty.unwrap_or_else(|| self.body.clone());

        let mut rendered = Vec::with_capacity(body.len() + 5);
        if options.include_status {
            rendered.extend_from_slice(format!("{}\n", self.status).as_bytes());
        }
        rendered.extend_from_slice(&body);
        rendered
    }

    /// 寫出內容並補上結尾換行
    pub fn write_to<W: Write>(&self, options: OutputOptions, out: &mut W) -> std::io::Result<()> {
        out.write_all(&self.render(options))?;
        out.write_all(b"\n")?;
        out.flush()
    }
}
