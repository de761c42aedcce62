use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::page_range::parse_page_indices;
use crate::pdf::PdfDocument;
use crate::session;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfCropRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Pages to keep (e.g. '1-3,5,7-8' or 'all')")]
    #[serde(default = "default_pages")]
    pub pages: String,
    #[schemars(description = "Directory to write the cropped copy into")]
    pub output_dir: String,
}

fn default_pages() -> String {
    "all".to_string()
}

#[derive(Debug, Clone)]
pub struct CropServer {
    tool_router: ToolRouter<Self>,
}

impl CropServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for CropServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl CropServer {
    #[tool(description = "Get PDF metadata including title, author, creation date, and page count")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let info = doc.info();
                let result = PdfInfoResult {
                    path,
                    page_count: info.page_count,
                    title: info.title,
                    author: info.author,
                    creation_date: info.creation_date,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(
        description = "Crop a PDF down to the selected pages and save the copy as <name>_cropped.pdf in the output directory. Use page range syntax like '1-3,5,7-8', or 'all' for every page."
    )]
    fn pdf_crop(&self, Parameters(req): Parameters<PdfCropRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };

        let indices = match parse_page_indices(&req.pages, doc.page_count()) {
            Ok(i) => i,
            Err(e) => return format!("Error: {}", e),
        };

        let mut cropped = match doc.select_pages(&indices) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };

        let output_dir = Path::new(&req.output_dir);
        if let Err(e) = std::fs::create_dir_all(output_dir) {
            return format!("Error: cannot create {}: {}", output_dir.display(), e);
        }
        let output = output_dir.join(session::output_file_name(Path::new(&req.path)));

        let page_count = cropped.get_pages().len() as u32;
        if let Err(e) = PdfDocument::save_atomic(&mut cropped, &output) {
            return format!("Error: {}", e);
        }

        let result = CropResult {
            output_path: output.display().to_string(),
            page_count,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub creation_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CropResult {
    pub output_path: String,
    pub page_count: u32,
}

#[tool_handler]
impl ServerHandler for CropServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page cropping tools. Use pdf_info to get document metadata and page counts, \
                 and pdf_crop to write a copy of a PDF containing only the selected pages."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = CropServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
