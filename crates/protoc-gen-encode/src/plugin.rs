//! protoc plugin protocol.
//!
//! protoc writes a `CodeGeneratorRequest` to stdin and reads a
//! `CodeGeneratorResponse` from stdout. Generation failures are reported in
//! the response's `error` field; only transport failures exit non-zero.

use std::io::{Read, Write};

use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use encode_compiler::schema::descriptor::files_from_descriptors;
use encode_compiler::{CompilerError, GeneratedFile, Generator, GeneratorConfig};

/// Serves one plugin request over stdin/stdout.
pub fn run_stdio() -> miette::Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .map_err(|e| CompilerError::io("<stdin>", e.to_string()))?;

    let request = CodeGeneratorRequest::decode(input.as_slice()).map_err(|e| CompilerError::DescriptorDecode {
        what: "CodeGeneratorRequest".to_string(),
        message: e.to_string(),
    })?;

    let response = respond(&request);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response.encode_to_vec())
        .and_then(|_| stdout.flush())
        .map_err(|e| CompilerError::io("<stdout>", e.to_string()))?;
    Ok(())
}

/// Builds the response for a decoded request.
pub fn respond(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    };

    match generate(request) {
        Ok(generated) => response.file.push(File {
            name: Some(generated.name),
            content: Some(generated.content),
            ..Default::default()
        }),
        Err(err) => {
            tracing::debug!(error = %err, "Generation failed");
            response.error = Some(err.to_string());
        }
    }
    response
}

fn generate(request: &CodeGeneratorRequest) -> Result<GeneratedFile, CompilerError> {
    let config = GeneratorConfig::from_parameter(request.parameter())?;
    let files = files_from_descriptors(&request.proto_file)?;
    tracing::debug!(
        files = files.len(),
        to_generate = request.file_to_generate.len(),
        "Decoded plugin request"
    );
    Generator::new(config).generate(&files)
}
