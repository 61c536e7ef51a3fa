// src/services/document_service.rs

use std::{path::PathBuf, sync::Arc};

use genpdf::{elements, style, Element};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::SalaryRepository,
    services::{
        employee_service::EmployeeService,
        settings_service::SettingsProvider,
    },
};

#[derive(Clone)]
pub struct DocumentService {
    salaries: SalaryRepository,
    employees: EmployeeService,
    settings: Arc<SettingsProvider>,
    fonts_dir: PathBuf,
    font_family: String,
}

fn pdf_err(e: genpdf::error::Error) -> AppError {
    AppError::PdfError(e.to_string())
}

impl DocumentService {
    pub fn new(
        salaries: SalaryRepository,
        employees: EmployeeService,
        settings: Arc<SettingsProvider>,
        fonts_dir: PathBuf,
        font_family: String,
    ) -> Self {
        Self {
            salaries,
            employees,
            settings,
            fonts_dir,
            font_family,
        }
    }

    /// Holerite em PDF, com os rótulos e a identidade da empresa configurados.
    pub fn salary_slip_pdf(&self, salary_id: &str) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados
        let salary = self
            .salaries
            .find_by_id(salary_id)
            .ok_or_else(|| AppError::RecordNotFound {
                collection: "salaries",
                id: salary_id.to_string(),
            })?;
        let employee = self.employees.get(&salary.employee_id).ok();
        let settings = self.settings.get();
        let labels = &settings.app.salary_slip_labels;
        let currency = settings.payroll.currency_symbol.as_str();
        let money = |value: Decimal| format!("{} {:.2}", currency, value);

        // 2. Configura o PDF
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, &self.font_family, None)
            .map_err(|_| {
                AppError::FontNotFound(format!(
                    "{} em {}",
                    self.font_family,
                    self.fonts_dir.display()
                ))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("{} {}", labels.title, salary.month));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        let header = if settings.company.name.is_empty() {
            settings.app.app_name.clone()
        } else {
            settings.company.name.clone()
        };
        doc.push(elements::Paragraph::new(header).styled(style::Style::new().bold().with_font_size(18)));

        for line in [&settings.company.address, &settings.company.tax_id]
            .into_iter()
            .filter(|l| !l.is_empty())
        {
            doc.push(elements::Paragraph::new(line.as_str()).styled(style::Style::new().with_font_size(10)));
        }

        doc.push(elements::Break::new(1.5));
        doc.push(
            elements::Paragraph::new(format!("{} - {}", labels.title, salary.month))
                .styled(style::Style::new().bold().with_font_size(14)),
        );

        let name = self.employees.display_name(&salary.employee_id);
        let (position, department) = match &employee {
            Some(e) => (e.position.as_str(), e.department.as_str()),
            None => ("-", "-"),
        };
        doc.push(elements::Paragraph::new(format!("{} ({})", name, salary.employee_id)));
        doc.push(elements::Paragraph::new(format!("{} / {}", position, department)));
        doc.push(elements::Break::new(2));

        // --- VALORES ---
        let mut table = elements::TableLayout::new(vec![3, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let rows = [
            (labels.basic_salary.as_str(), salary.basic_salary),
            (labels.allowances.as_str(), salary.allowances),
            (labels.deductions.as_str(), salary.deductions),
        ];
        for (label, value) in rows {
            let mut amount = elements::Paragraph::new(money(value));
            amount.set_alignment(genpdf::Alignment::Right);
            table
                .row()
                .element(elements::Paragraph::new(label))
                .element(amount)
                .push()
                .map_err(pdf_err)?;
        }

        let bold = style::Style::new().bold();
        let mut net = elements::Paragraph::new(money(salary.net_salary));
        net.set_alignment(genpdf::Alignment::Right);
        table
            .row()
            .element(elements::Paragraph::new(labels.net_salary.as_str()).styled(bold))
            .element(net.styled(bold))
            .push()
            .map_err(pdf_err)?;

        doc.push(table);

        // --- RODAPÉ ---
        if !settings.branding.footer_text.is_empty() {
            doc.push(elements::Break::new(2));
            doc.push(
                elements::Paragraph::new(settings.branding.footer_text.as_str())
                    .styled(style::Style::new().italic().with_font_size(8)),
            );
        }

        // 3. Renderiza para buffer
        let mut buffer = Vec::new();
        doc.render(&mut buffer).map_err(pdf_err)?;

        tracing::info!(salary_id, bytes = buffer.len(), "🧾 Holerite em PDF gerado");
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{EmployeeRepository, JsonStore, MemoryStore, SettingsRepository};
    use crate::services::{employee_service::tests::draft, payroll_service::PayrollService};

    fn setup(fonts_dir: PathBuf) -> (DocumentService, PayrollService, EmployeeService) {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        let employees = EmployeeService::new(EmployeeRepository::new(store.clone()));
        let settings = Arc::new(SettingsProvider::new(SettingsRepository::new(store.clone())));
        let payroll = PayrollService::new(
            SalaryRepository::new(store.clone()),
            employees.clone(),
            Arc::clone(&settings),
        );
        let documents = DocumentService::new(
            SalaryRepository::new(store),
            employees.clone(),
            settings,
            fonts_dir,
            "Roboto".into(),
        );
        (documents, payroll, employees)
    }

    #[test]
    fn unknown_salary_is_not_found() {
        let (documents, _, _) = setup(PathBuf::from("./fonts"));
        assert!(matches!(
            documents.salary_slip_pdf("nope"),
            Err(AppError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn missing_fonts_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (documents, payroll, employees) = setup(dir.path().join("sem-fontes"));
        let alice = employees.create(draft("Alice", "Engineering", 5000)).unwrap();
        let slip = payroll.generate(&alice.id, "2024-03").unwrap();

        assert!(matches!(
            documents.salary_slip_pdf(&slip.id),
            Err(AppError::FontNotFound(_))
        ));
    }
}
