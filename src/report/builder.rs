// file: src/report/builder.rs
// description: renders a digest into the subject and body of the notification mail
// reference: plain-text and html mail bodies

use crate::config::{ReportConfig, ReportFormat};
use crate::models::{Digest, MatchResult, SearchTerm};
use serde::Serialize;

const BLOCK_RULE: &str = "--------------------";
const PRE_STYLE: &str =
    "white-space: pre-wrap; background-color: #f4f4f4; border: 1px solid #ddd; padding: 10px;";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub subject: String,
    pub body: String,
    pub format: ReportFormat,
}

#[derive(Debug, Clone)]
pub struct ReportBuilder {
    format: ReportFormat,
    include_footer: bool,
}

impl ReportBuilder {
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            include_footer: false,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.format).with_footer(config.include_footer)
    }

    pub fn with_footer(mut self, include_footer: bool) -> Self {
        self.include_footer = include_footer;
        self
    }

    /// `all_terms` is expected to be deduplicated, as `SearchTermSet` produces;
    /// each entry with a non-zero count gets one summary line.
    pub fn build(&self, document_name: &str, digest: &Digest, all_terms: &[SearchTerm]) -> Report {
        let (subject, mut body) = if digest.has_matches() {
            (
                format!("📰🔵✅ {document_name} (Termos encontrados) 📢"),
                self.found_body(document_name, digest, all_terms),
            )
        } else {
            (
                format!("📰🔵❌ {document_name} (Termos não encontrados)"),
                self.not_found_body(document_name),
            )
        };

        if self.include_footer {
            body.push_str(&self.footer());
        }

        Report {
            subject,
            body,
            format: self.format,
        }
    }

    fn found_body(
        &self,
        document_name: &str,
        digest: &Digest,
        all_terms: &[SearchTerm],
    ) -> String {
        let mut summary = vec![format!(
            "Total de publicações com termos de interesse: {}",
            digest.total_matches()
        )];
        summary.extend(all_terms.iter().filter_map(|term| {
            let count = digest.count_for(term);
            (count > 0).then(|| {
                format!(
                    "O termo '{}' foi encontrado em {} publicação(ões).",
                    term.original, count
                )
            })
        }));

        match self.format {
            ReportFormat::Plain => {
                let mut body =
                    format!("🤖 Olá,\n\nResumo da Pesquisa no Diário '{document_name}':\n");
                for line in &summary {
                    body.push_str(&format!("- {line}\n"));
                }
                body.push_str(
                    "\nO arquivo PDF completo do DOTCE-CE está em anexo para consulta.\n\n",
                );
                body.push_str("============ 📄 PUBLICAÇÕES ENCONTRADAS 📄 ============\n\n");
                for (index, result) in digest.results.iter().enumerate() {
                    body.push_str(&format!(
                        "{BLOCK_RULE} ⚠️ {} ⚠️ {BLOCK_RULE}\n\n{}\n\n",
                        block_title(index + 1, result),
                        result.text
                    ));
                }
                body
            }
            ReportFormat::Html => {
                let mut body = format!(
                    "<p>🤖 Olá,</p><h3>Resumo da Pesquisa no Diário '{}':</h3><ul>",
                    escape_html(document_name)
                );
                for line in &summary {
                    body.push_str(&format!("<li>{}</li>", escape_html(line)));
                }
                body.push_str(
                    "</ul><p>O arquivo PDF completo do DOTCE-CE está em anexo para consulta.</p><hr>",
                );
                for (index, result) in digest.results.iter().enumerate() {
                    body.push_str(&format!(
                        "<h4>⚠️ {}</h4><pre style='{PRE_STYLE}'>{}</pre><hr>",
                        escape_html(&block_title(index + 1, result)),
                        escape_html(&result.text)
                    ));
                }
                body
            }
        }
    }

    fn not_found_body(&self, document_name: &str) -> String {
        let confirmation = format!(
            "Esta é uma confirmação de que a verificação no Diário Oficial do Tribunal de Contas \
             do Estado do Ceará mais recente disponível ({document_name}) foi realizada com sucesso."
        );
        let nothing = "Nenhuma publicação com os termos pesquisados foi encontrada.";
        let attached = "O arquivo PDF do DOTCE-CE está em anexo para consulta.";

        match self.format {
            ReportFormat::Plain => {
                format!("🤖 Olá,\n\n{confirmation}\n\n{nothing}\n\n{attached}")
            }
            ReportFormat::Html => format!(
                "<p>🤖 Olá,</p><p>{}</p><p>{nothing}</p><p>{attached}</p>",
                escape_html(&confirmation)
            ),
        }
    }

    fn footer(&self) -> String {
        let feedback = "💡 Caso sinta falta de alguma publicação, por gentileza me comunique em \
                        resposta a este e-mail para a melhoria contínua da minha atuação. 🦾";
        let signature = "🤖 Robô extraoficial de notificações do DOTCE-CE 📄";

        match self.format {
            ReportFormat::Plain => format!("\n\n{feedback}\n\nAtenciosamente,\n{signature}"),
            ReportFormat::Html => format!("<p>{feedback}</p><p>Atenciosamente,<br>{signature}</p>"),
        }
    }
}

fn block_title(sequence: usize, result: &MatchResult) -> String {
    let terms = result
        .terms
        .iter()
        .map(|t| format!("'{}'", t.original))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Publicação nº {sequence} (Termo(s) encontrado(s): {terms})")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeadingKind, TermCount};
    use pretty_assertions::assert_eq;

    fn terms() -> Vec<SearchTerm> {
        vec![
            SearchTerm::new("Secretaria de Educação"),
            SearchTerm::new("Secretaria de Juventude"),
            SearchTerm::new("Instituto Dr. José Frota"),
        ]
    }

    fn digest() -> Digest {
        let terms = terms();
        Digest {
            units_scanned: 5,
            results: vec![
                MatchResult {
                    ordinal: 1,
                    kind: HeadingKind::Ordinance,
                    line: 10,
                    text: "PORTARIA Nº 1\nSecretaria de Educação".to_string(),
                    terms: vec![terms[0].clone()],
                },
                MatchResult {
                    ordinal: 4,
                    kind: HeadingKind::Act,
                    line: 40,
                    text: "ATO Nº 2\nEducação <e> Frota".to_string(),
                    terms: vec![terms[0].clone(), terms[2].clone()],
                },
            ],
            counts: vec![
                TermCount {
                    term: terms[0].clone(),
                    count: 2,
                },
                TermCount {
                    term: terms[1].clone(),
                    count: 0,
                },
                TermCount {
                    term: terms[2].clone(),
                    count: 1,
                },
            ],
        }
    }

    #[test]
    fn test_found_plain_report() {
        let report = ReportBuilder::new(ReportFormat::Plain).build(
            "DOTCECE_12-140.pdf",
            &digest(),
            &terms(),
        );

        assert!(report.subject.contains("DOTCECE_12-140.pdf"));
        assert!(report.subject.contains("Termos encontrados"));

        let expected_start = "🤖 Olá,\n\nResumo da Pesquisa no Diário 'DOTCECE_12-140.pdf':\n\
             - Total de publicações com termos de interesse: 2\n\
             - O termo 'Secretaria de Educação' foi encontrado em 2 publicação(ões).\n\
             - O termo 'Instituto Dr. José Frota' foi encontrado em 1 publicação(ões).\n";
        assert!(report.body.starts_with(expected_start), "{}", report.body);
        assert!(!report.body.contains("Secretaria de Juventude"));
    }

    #[test]
    fn test_blocks_are_numbered_in_order() {
        let report = ReportBuilder::new(ReportFormat::Plain).build("doc.pdf", &digest(), &terms());

        let first = report
            .body
            .find("Publicação nº 1 (Termo(s) encontrado(s): 'Secretaria de Educação')")
            .unwrap();
        let second = report
            .body
            .find("Publicação nº 2 (Termo(s) encontrado(s): 'Secretaria de Educação', 'Instituto Dr. José Frota')")
            .unwrap();
        assert!(first < second);
        assert!(report.body.contains("ATO Nº 2\nEducação <e> Frota\n\n"));
        assert!(!report.body.contains("Atenciosamente"));
    }

    #[test]
    fn test_not_found_report() {
        let digest = Digest::empty(&terms());
        let report = ReportBuilder::new(ReportFormat::Plain)
            .with_footer(true)
            .build("doc.pdf", &digest, &terms());

        assert_eq!(report.subject, "📰🔵❌ doc.pdf (Termos não encontrados)");
        assert!(report.body.contains("(doc.pdf) foi realizada com sucesso"));
        assert!(report.body.contains("Nenhuma publicação"));
        assert!(report.body.ends_with("🤖 Robô extraoficial de notificações do DOTCE-CE 📄"));
    }

    #[test]
    fn test_html_report_escapes_unit_text() {
        let report = ReportBuilder::new(ReportFormat::Html).build("doc.pdf", &digest(), &terms());

        assert_eq!(report.format, ReportFormat::Html);
        assert!(report.body.contains("Educação &lt;e&gt; Frota"));
        assert!(report.body.contains("<pre style="));
        assert!(report.body.contains("&#39;Secretaria de Educação&#39;"));
    }

    #[test]
    fn test_from_config() {
        let builder = ReportBuilder::from_config(&ReportConfig::default());
        let report = builder.build("doc.pdf", &Digest::empty(&[]), &[]);

        assert_eq!(report.format, ReportFormat::Plain);
        assert!(report.body.contains("Atenciosamente"));
    }
}
