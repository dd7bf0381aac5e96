// Identity document extraction CLI.
// OCRs an image (or takes pre-extracted OCR text), classifies the document
// type and prints the grounded field schema.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use kagaz::config::Settings;
use kagaz::models::{
    DocumentFields, DocumentType, ExtractionResponse, FieldEvidence, GroundedExtraction,
};
use kagaz::processing::{NoSpans, SpanProvider, StaticSpans, TesseractOcr};
use kagaz::DocumentExtractor;

#[derive(Parser)]
#[command(name = "kagaz", about = "Identity document OCR extraction with grounded evidence")]
struct Cli {
    /// Image to OCR, or an OCR text file with --raw-text
    input: PathBuf,

    /// Treat the input file as already-extracted OCR text
    #[arg(long)]
    raw_text: bool,

    /// Expected document type (PAN, AADHAAR, PASSPORT, OTHER)
    #[arg(long, value_name = "TYPE")]
    document_type: Option<DocumentType>,

    /// JSON file with extraction spans from an external extractor run
    #[arg(long, value_name = "FILE")]
    spans: Option<PathBuf>,

    /// Tesseract language (defaults to OCR_LANGUAGE or "eng")
    #[arg(long)]
    language: Option<String>,

    /// Print the full response as JSON instead of a report
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut settings = Settings::from_env();
    if let Some(language) = &cli.language {
        settings.ocr_language = language.clone();
    }

    let spans = match &cli.spans {
        Some(path) => {
            let provider = StaticSpans::from_json_file(path).map_err(|e| e.to_string())?;
            Some(provider)
        }
        None => None,
    };

    if cli.raw_text {
        let ocr_text = std::fs::read_to_string(&cli.input)
            .map_err(|e| format!("unable to read {}: {}", cli.input.display(), e))?;
        let ocr_text = ocr_text.trim();
        if ocr_text.is_empty() {
            return Err("OCR text file is empty".to_string());
        }

        let span_list = match spans {
            Some(provider) => provider
                .extract(ocr_text, DocumentType::Other)
                .map_err(|e| e.to_string())?,
            None => Vec::new(),
        };

        let result = DocumentExtractor::classify_and_ground(ocr_text, cli.document_type, &span_list);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?);
        } else {
            print_grounded_report(&result);
        }
        return Ok(());
    }

    let ocr = Box::new(TesseractOcr::with_language(&settings.ocr_language));
    let span_provider: Box<dyn SpanProvider> = match spans {
        Some(provider) => Box::new(provider),
        None => Box::new(NoSpans),
    };
    let extractor = DocumentExtractor::with_providers(settings, ocr, span_provider);

    let response = extractor
        .process_path(&cli.input, cli.document_type, true, true)
        .map_err(|e| format!("[{}] {}", e.code(), e))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).map_err(|e| e.to_string())?
        );
    } else {
        print_response_report(&response);
    }

    Ok(())
}

fn print_response_report(response: &ExtractionResponse) {
    println!("\n===============================================");
    println!("        DOCUMENT EXTRACTION REPORT");
    println!("===============================================\n");

    println!("File: {}", response.filename);
    if let Some(requested) = response.document_type_requested {
        println!("Requested Type: {}", requested);
    }
    println!("Detected Type: {}", response.document_type_detected);
    println!("OCR Characters: {}", response.ocr.char_count);
    println!("OCR Preview: {}", response.ocr.text_preview.replace('\n', " | "));

    print_fields(&response.fields);

    if !response.issues.is_empty() {
        println!("\nISSUES:");
        for issue in &response.issues {
            println!("  - [{:?}] {}: {}", issue.severity, issue.code, issue.message);
        }
    }

    let timings = &response.timings_ms;
    println!("\nTIMINGS (ms):");
    if let Some(validation) = timings.validation {
        println!("  Validation: {}", validation);
    }
    println!("  OCR: {}", timings.ocr);
    println!("  Detection: {}", timings.detection);
    println!("  Extraction: {}", timings.extraction);
    println!("  Total: {}", timings.total);
}

fn print_grounded_report(result: &GroundedExtraction) {
    println!("\n===============================================");
    println!("        DOCUMENT EXTRACTION REPORT");
    println!("===============================================\n");

    println!("Detected Type: {}", result.document_type);
    print_fields(&result.fields);

    if !result.issues.is_empty() {
        println!("\nISSUES:");
        for issue in &result.issues {
            println!("  - [{:?}] {}: {}", issue.severity, issue.code, issue.message);
        }
    }
}

fn print_fields(fields: &DocumentFields) {
    println!("\nFIELDS:");
    match fields {
        DocumentFields::Pan(pan) => {
            print_field("PAN Number", &pan.pan_number);
            print_field("Full Name", &pan.full_name);
            print_field("Father's Name", &pan.father_name);
            print_field("Date of Birth", &pan.date_of_birth);
        }
        DocumentFields::Aadhaar(aadhaar) => {
            print_field("Aadhaar Number", &aadhaar.aadhaar_number);
            print_field("Full Name", &aadhaar.full_name);
            print_field("Date of Birth", &aadhaar.date_of_birth);
            print_field("Year of Birth", &aadhaar.year_of_birth);
            print_field("Gender", &aadhaar.gender);
            print_field("Address", &aadhaar.address);
            print_field("Care Of", &aadhaar.care_of);
            print_field("PIN Code", &aadhaar.pin_code);
        }
        DocumentFields::Passport(passport) => {
            print_field("Passport Number", &passport.passport_number);
            print_field("Surname", &passport.surname);
            print_field("Given Names", &passport.given_names);
            print_field("Nationality", &passport.nationality);
            print_field("Date of Birth", &passport.date_of_birth);
            print_field("Sex", &passport.sex);
            print_field("Place of Birth", &passport.place_of_birth);
            print_field("Place of Issue", &passport.place_of_issue);
            print_field("Date of Issue", &passport.date_of_issue);
            print_field("Date of Expiry", &passport.date_of_expiry);
            print_field("File Number", &passport.file_number);
            print_field("MRZ Line 1", &passport.mrz_line_1);
            print_field("MRZ Line 2", &passport.mrz_line_2);
        }
        DocumentFields::Other(other) => {
            print_field("ID Number", &other.id_number);
            print_field("Full Name", &other.full_name);
            print_field("Date of Birth", &other.date_of_birth);
            print_field("Address", &other.address);
        }
    }
}

fn print_field(label: &str, field: &Option<FieldEvidence>) {
    match field {
        Some(evidence) => {
            let value = evidence.value.as_deref().unwrap_or("-");
            let source = evidence.source_extraction_class.as_deref().unwrap_or("-");
            match (evidence.start_pos, evidence.end_pos) {
                (Some(start), Some(end)) => {
                    println!("  {}: {} (source: {}, offsets {}..{})", label, value, source, start, end)
                }
                _ => println!("  {}: {} (source: {}, ungrounded)", label, value, source),
            }
        }
        None => println!("  {}: <not found>", label),
    }
}
