// Talking points and sample openers. The templates are the deterministic
// contract; a configured text generator may write richer opener copy, and
// any failure there falls back to the template for the lead's first signal.

use tracing::warn;

use exactfit_common::types::{ScoredLead, Signal, SignalKind};

use crate::traits::TextGenerator;

const OPENER_SYSTEM_PROMPT: &str = "\
You write one-sentence B2B cold email openers. Reference the specific \
buying signal, stay concrete, no fluff, no subject line. Return only the \
opener text.";

/// One talking point per signal the templates cover; other signal kinds
/// contribute nothing.
pub fn talking_points(signals: &[Signal]) -> Vec<String> {
    let mut points = Vec::new();
    for signal in signals {
        match signal.kind {
            SignalKind::HiringSales => {
                points.push(format!("Reference their sales hiring: \"{}\"", signal.detail));
            }
            SignalKind::HiringLeadership => {
                points.push(
                    "Mention you can help their new sales leader ramp up faster".to_string(),
                );
            }
            SignalKind::Funding => {
                points.push("Congratulate on funding, mention scaling challenges".to_string());
            }
            SignalKind::TechCompetitor => {
                let tool = competitor_tool(&signal.detail);
                points.push(format!("They use {tool} - mention your competitive advantages"));
            }
            SignalKind::TechTarget => {
                points.push(format!("Good tech fit: {}", signal.detail));
            }
            _ => {}
        }
    }
    points
}

/// Template opener derived from the first (primary) signal. Signals the
/// templates do not cover produce no opener.
pub fn template_opener(company_name: &str, signals: &[Signal]) -> Option<String> {
    let primary = signals.first()?;
    match primary.kind {
        SignalKind::HiringSales => Some(format!(
            "Saw {company_name} is {} - congrats on the growth! When teams scale outbound, \
             they usually hit data quality issues fast...",
            primary.detail.to_lowercase()
        )),
        SignalKind::HiringLeadership => Some(format!(
            "Noticed {company_name} is bringing on new sales leadership. New leaders usually \
             want quick wins - happy to show how we help teams book 5+ meetings/week..."
        )),
        SignalKind::Funding => Some(
            "Congrats on the funding! As you scale the sales team, data quality becomes \
             critical. We help teams maintain <10% bounce rates..."
                .to_string(),
        ),
        SignalKind::TechCompetitor => {
            let tool = competitor_tool(&primary.detail);
            Some(format!(
                "Noticed {company_name} uses {tool}. Many teams switch to us for better data \
                 quality and lower cost. Worth a quick comparison?"
            ))
        }
        _ => None,
    }
}

/// Generate an opener for a qualified lead: delegated copy when a generator
/// is configured, template fallback otherwise and on any failure. A lead
/// with zero signals gets no opener at all.
pub async fn generate_opener(
    generator: Option<&dyn TextGenerator>,
    lead: &ScoredLead,
    errors: &mut Vec<String>,
) -> Option<String> {
    if lead.signals.is_empty() {
        return None;
    }

    if let Some(generator) = generator {
        let signal_lines: Vec<String> = lead
            .signals
            .iter()
            .map(|s| format!("- {} ({} pts): {}", s.kind, s.points, s.detail))
            .collect();
        let contact_line = match &lead.contact {
            Some(c) => format!("{} ({})", c.full_name(), c.title),
            None => "unknown contact".to_string(),
        };
        let user = format!(
            "Company: {}\nContact: {}\nSignals:\n{}",
            lead.company.company_name,
            contact_line,
            signal_lines.join("\n")
        );
        match generator.complete(OPENER_SYSTEM_PROMPT, &user).await {
            Ok(text) if !text.trim().is_empty() => return Some(text.trim().to_string()),
            Ok(_) => {
                warn!(company = lead.company.company_name.as_str(), "Empty opener from generator");
            }
            Err(e) => {
                warn!(company = lead.company.company_name.as_str(), error = %e, "Opener generation failed");
                errors.push(format!(
                    "opener generation failed for {}: {e}",
                    lead.company.company_name
                ));
            }
        }
    }

    template_opener(&lead.company.company_name, &lead.signals)
}

/// "Uses Apollo (your competitor)" -> "Apollo".
fn competitor_tool(detail: &str) -> String {
    let stripped = detail.strip_prefix("Uses ").unwrap_or(detail);
    let stripped = stripped
        .strip_suffix(" (your competitor)")
        .unwrap_or(stripped);
    stripped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(kind: SignalKind, detail: &str) -> Signal {
        Signal {
            kind,
            points: 10,
            detail: detail.to_string(),
        }
    }

    #[test]
    fn competitor_tool_strips_prefix_and_suffix() {
        assert_eq!(competitor_tool("Uses Apollo (your competitor)"), "Apollo");
        assert_eq!(competitor_tool("Uses ZoomInfo (your competitor)"), "ZoomInfo");
    }

    #[test]
    fn talking_points_cover_each_templated_kind() {
        let signals = vec![
            signal(SignalKind::HiringSales, "Hiring 3 SDRs"),
            signal(SignalKind::HiringLeadership, "Hiring sales leadership"),
            signal(SignalKind::Funding, "Raised $12M"),
            signal(SignalKind::TechCompetitor, "Uses Apollo (your competitor)"),
            signal(SignalKind::TechTarget, "Uses HubSpot (good fit)"),
        ];
        let points = talking_points(&signals);
        assert_eq!(points.len(), 5);
        assert!(points[0].contains("Hiring 3 SDRs"));
        assert!(points[3].contains("Apollo"));
        assert!(points[4].contains("Uses HubSpot (good fit)"));
    }

    #[test]
    fn untemplated_kinds_contribute_nothing() {
        let signals = vec![signal(SignalKind::ComboBonus, "Multiple signals detected (3)")];
        assert!(talking_points(&signals).is_empty());
    }

    #[test]
    fn opener_uses_the_first_signal() {
        let signals = vec![
            signal(SignalKind::Funding, "Raised $12M"),
            signal(SignalKind::HiringSales, "Hiring 3 SDRs"),
        ];
        let opener = template_opener("Acme", &signals).unwrap();
        assert!(opener.contains("Congrats on the funding"));
    }

    #[test]
    fn no_signals_means_no_opener() {
        assert!(template_opener("Acme", &[]).is_none());
    }

    #[test]
    fn tech_target_primary_signal_has_no_opener_template() {
        let signals = vec![signal(SignalKind::TechTarget, "Uses HubSpot (good fit)")];
        assert!(template_opener("Acme", &signals).is_none());
    }
}
