//! Plain-text presentation of the form for the command line.

use std::io::{BufRead, Write};

use crate::domain::prediction::PredictionPort;
use crate::form::{FieldSpec, FieldValue};
use crate::submission::{
    DispatchOutcome, FieldView, FormEvent, RiskLevel, SubmissionController, SubmissionState,
};

pub fn render_registry(specs: &[FieldSpec]) -> String {
    let mut out = String::new();
    for spec in specs {
        out.push_str(&format!(
            "{:<26} {:<28} {} to {} (step {})\n",
            spec.id.as_str(),
            spec.label,
            spec.minimum,
            spec.maximum,
            spec.step()
        ));
    }
    out
}

pub fn render_field(view: &FieldView<'_>) -> String {
    let value = match view.value {
        FieldValue::Empty => "-".to_string(),
        other => other.display(),
    };
    match view.error {
        Some(error) => format!("{:<28} {:>8}  ! {}", view.spec.label, value, error),
        None => format!("{:<28} {:>8}", view.spec.label, value),
    }
}

pub fn render_form(views: &[FieldView<'_>]) -> String {
    views.iter().map(|v| render_field(v) + "\n").collect()
}

/// Result banner, `None` while idle
pub fn render_submission(state: &SubmissionState) -> Option<String> {
    match state {
        SubmissionState::Idle => None,
        SubmissionState::Submitting => Some("Analyzing your health data...".to_string()),
        SubmissionState::Succeeded {
            prediction,
            feedback,
        } => {
            let badge = match prediction.risk() {
                RiskLevel::High => "High Risk",
                RiskLevel::Low => "Low Risk",
            };
            let mut banner = format!("[{}] {}\n{}", badge, prediction, feedback);
            if !prediction.is_recognized() {
                banner.push_str("\n(unrecognized label from the prediction service)");
            }
            Some(banner)
        }
        SubmissionState::Failed { message } => Some(format!("Error: {}", message)),
    }
}

/// Drives one assessment from the terminal.
///
/// `initial` values are applied first. In interactive mode missing or invalid
/// fields are prompted for on `input`, and a failed request offers a retry.
/// Otherwise up to `retries` automatic retries are made.
pub async fn run_assessment<P, R, W>(
    controller: &mut SubmissionController,
    port: &P,
    initial: &[(crate::form::FieldId, &str)],
    interactive: bool,
    retries: u32,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<SubmissionState>
where
    P: PredictionPort + ?Sized,
    R: BufRead,
    W: Write,
{
    for (field, raw) in initial {
        controller.dispatch(FormEvent::field_changed(*field, *raw));
    }

    if interactive {
        prompt_missing(controller, input, output)?;
    }

    if controller.submit_with(port).await == DispatchOutcome::Blocked {
        writeln!(output, "Please correct the highlighted fields:")?;
        write!(output, "{}", render_form(&controller.field_views()))?;
        return Ok(controller.snapshot().submission().clone());
    }

    let mut attempts = 0;
    loop {
        let message = match controller.snapshot().submission() {
            SubmissionState::Failed { message } => message.clone(),
            _ => break,
        };
        writeln!(output, "Error: {}", message)?;
        let again = if interactive {
            confirm(input, output, "Retry? [y/N] ")?
        } else {
            attempts < retries
        };
        if !again {
            break;
        }
        attempts += 1;
        if controller.retry_with(port).await == DispatchOutcome::Blocked {
            write!(output, "{}", render_form(&controller.field_views()))?;
            break;
        }
    }

    let state = controller.snapshot().submission().clone();
    if let SubmissionState::Succeeded { .. } = state {
        if let Some(banner) = render_submission(&state) {
            writeln!(output, "{}", banner)?;
        }
    }
    Ok(state)
}

fn prompt_missing<R: BufRead, W: Write>(
    controller: &mut SubmissionController,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    let pending: Vec<&'static FieldSpec> = controller
        .field_views()
        .into_iter()
        .filter(|v| v.error.is_some() || !matches!(v.value, FieldValue::Number(_)))
        .map(|v| v.spec)
        .collect();

    for spec in pending {
        loop {
            write!(output, "{} [{}-{}]: ", spec.label, spec.minimum, spec.maximum)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            controller.dispatch(FormEvent::field_changed(spec.id, line.trim()));
            match controller.snapshot().errors().get(spec.id) {
                Some(error) => writeln!(output, "  {}", error)?,
                None => break,
            }
        }
    }
    Ok(())
}

fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> anyhow::Result<bool> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::{PredictionPayload, PredictionResponse};
    use crate::form::{fields, FieldId};
    use crate::submission::{PredictionError, PredictionLabel, PredictionResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first `failures` calls, then answers with `label`
    struct FlakyPort {
        failures: usize,
        label: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PredictionPort for FlakyPort {
        async fn predict(&self, _payload: &PredictionPayload) -> PredictionResult<PredictionResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(PredictionError::Rejected {
                    status: 503,
                    message: Some("service unavailable".to_string()),
                })
            } else {
                Ok(PredictionResponse {
                    prediction: self.label.to_string(),
                })
            }
        }
    }

    const VALID: [(FieldId, &str); 8] = [
        (FieldId::Pregnancies, "2"),
        (FieldId::Glucose, "120"),
        (FieldId::BloodPressure, "70"),
        (FieldId::SkinThickness, "20"),
        (FieldId::Insulin, "80"),
        (FieldId::Bmi, "24.5"),
        (FieldId::DiabetesPedigreeFunction, "0.5"),
        (FieldId::Age, "33"),
    ];

    #[test]
    fn test_render_registry_lists_every_field() {
        let text = render_registry(fields());
        assert_eq!(text.lines().count(), 8);
        assert!(text.contains("DiabetesPedigreeFunction"));
        assert!(text.contains("0 to 2.5 (step 0.001)"));
    }

    #[test]
    fn test_render_submission_banners() {
        assert!(render_submission(&SubmissionState::Idle).is_none());
        let high = render_submission(&SubmissionState::succeeded(PredictionLabel::Diabetic)).unwrap();
        assert!(high.starts_with("[High Risk] Diabetic"));
        let odd = render_submission(&SubmissionState::succeeded(PredictionLabel::parse("Maybe"))).unwrap();
        assert!(odd.contains("[Low Risk] Maybe"));
        assert!(odd.contains("unrecognized"));
        let failed = render_submission(&SubmissionState::Failed {
            message: "service unavailable".to_string(),
        });
        assert_eq!(failed.as_deref(), Some("Error: service unavailable"));
    }

    #[tokio::test]
    async fn test_non_interactive_retries() {
        let port = FlakyPort {
            failures: 2,
            label: "Diabetic",
            calls: AtomicUsize::new(0),
        };
        let mut controller = SubmissionController::new();
        let mut output = Vec::new();

        let state = run_assessment(&mut controller, &port, &VALID, false, 2, &mut &b""[..], &mut output)
            .await
            .unwrap();

        assert_eq!(state, SubmissionState::succeeded(PredictionLabel::Diabetic));
        assert_eq!(port.calls.load(Ordering::SeqCst), 3);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Error: service unavailable").count(), 2);
        assert!(text.contains("[High Risk] Diabetic"));
    }

    #[tokio::test]
    async fn test_retries_exhausted_leaves_failed() {
        let port = FlakyPort {
            failures: 5,
            label: "Diabetic",
            calls: AtomicUsize::new(0),
        };
        let mut controller = SubmissionController::new();
        let mut output = Vec::new();

        let state = run_assessment(&mut controller, &port, &VALID, false, 1, &mut &b""[..], &mut output)
            .await
            .unwrap();

        assert!(matches!(state, SubmissionState::Failed { .. }));
        assert_eq!(port.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_interactive_prompts_until_valid() {
        let port = FlakyPort {
            failures: 1,
            label: "Non-Diabetic",
            calls: AtomicUsize::new(0),
        };
        let mut controller = SubmissionController::new();
        let initial: Vec<(FieldId, &str)> = VALID.iter().copied().filter(|(id, _)| *id != FieldId::Glucose).collect();
        // glucose: out of range, then valid; then accept the retry
        let mut input = &b"400\n120\ny\n"[..];
        let mut output = Vec::new();

        let state = run_assessment(&mut controller, &port, &initial, true, 0, &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(state, SubmissionState::succeeded(PredictionLabel::NonDiabetic));
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Glucose (mg/dL) [0-300]: ").count(), 2);
        assert!(text.contains("  Must be between 0 and 300"));
        assert!(text.contains("Retry? [y/N] "));
    }

    #[tokio::test]
    async fn test_blocked_submission_shows_errors() {
        let port = FlakyPort {
            failures: 0,
            label: "Diabetic",
            calls: AtomicUsize::new(0),
        };
        let mut controller = SubmissionController::new();
        let mut output = Vec::new();

        let state = run_assessment(
            &mut controller,
            &port,
            &[(FieldId::Glucose, "400")],
            false,
            0,
            &mut &b""[..],
            &mut output,
        )
        .await
        .unwrap();

        assert_eq!(state, SubmissionState::Idle);
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Please correct the highlighted fields:"));
        assert_eq!(text.matches("! Must be").count(), 8);
    }
}
