//! Typst to PDF compiler.
//!
//! Compiles Typst markup to PDF bytes using typst-as-lib.

use typst_as_lib::TypstEngine;

use crate::error::{PdfError, Result};

/// Compiler for converting Typst markup to PDF
pub struct Compiler;

impl Compiler {
    /// Compile Typst markup to PDF bytes.
    ///
    /// Compilation warnings are tolerated; only hard errors surface.
    pub fn compile(markup: &str) -> Result<Vec<u8>> {
        let engine = TypstEngine::builder()
            .main_file(markup.to_string())
            .build();

        // compiled.output is the Result; compiled.warnings is ignored
        let compiled = engine.compile();
        let document = compiled
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;

        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(&document, &options)
            .map_err(|e| PdfError::Compilation(format!("PDF export failed: {:?}", e)))?;

        Ok(pdf_bytes.into())
    }
}
