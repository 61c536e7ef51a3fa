// src/models/settings.rs

use chrono::{NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::common::db_utils::{deserialize_some, hhmm};

pub const DEFAULT_APP_NAME: &str = "HR Management System";

// Chaves de armazenamento de cada seção
pub const APP_SETTINGS_KEY: &str = "appSettings";
pub const COMPANY_SETTINGS_KEY: &str = "companySettings";
pub const BRANDING_SETTINGS_KEY: &str = "brandingSettings";
pub const WORKING_HOURS_SETTINGS_KEY: &str = "workingHoursSettings";
pub const PAYROLL_SETTINGS_KEY: &str = "payrollSettings";

/// Rótulos do holerite que o usuário pode sobrescrever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalarySlipLabels {
    pub title: String,
    pub basic_salary: String,
    pub allowances: String,
    pub deductions: String,
    pub net_salary: String,
}

impl Default for SalarySlipLabels {
    fn default() -> Self {
        Self {
            title: "Salary Slip".to_string(),
            basic_salary: "Basic Salary".to_string(),
            allowances: "Allowances".to_string(),
            deductions: "Deductions".to_string(),
            net_salary: "Net Salary".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSection {
    pub app_name: String,
    // Data URL da imagem (ex.: "data:image/png;base64,...")
    pub logo_data: Option<String>,
    pub salary_slip_labels: SalarySlipLabels,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            logo_data: None,
            salary_slip_labels: SalarySlipLabels::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySettings {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub tax_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub footer_text: String,
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self {
            primary_color: "#1e40af".to_string(),
            secondary_color: "#64748b".to_string(),
            footer_text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkingHoursSettings {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub late_grace_minutes: u32,
    pub working_days: Vec<Weekday>,
}

impl Default for WorkingHoursSettings {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            late_grace_minutes: 15,
            working_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
        }
    }
}

impl WorkingHoursSettings {
    /// Entrada depois de início + tolerância conta como atraso.
    /// Se a tolerância passa da meia-noite, nenhuma entrada do dia é atraso.
    pub fn is_late(&self, check_in: NaiveTime) -> bool {
        let grace = chrono::Duration::minutes(i64::from(self.late_grace_minutes));
        let (limit, wrapped_secs) = self.start_time.overflowing_add_signed(grace);
        wrapped_secs == 0 && check_in > limit
    }
}

/// Política de folha. Os percentuais são configuráveis; os padrões (10% / 5%)
/// são apenas valores iniciais.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayrollSettings {
    pub allowance_rate: Decimal,
    pub deduction_rate: Decimal,
    pub currency_symbol: String,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            allowance_rate: Decimal::new(10, 2),
            deduction_rate: Decimal::new(5, 2),
            currency_symbol: "$".to_string(),
        }
    }
}

/// O objeto de configurações completo. Cada seção é gravada na sua própria chave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub app: AppSection,
    pub company: CompanySettings,
    pub branding: BrandingSettings,
    pub working_hours: WorkingHoursSettings,
    pub payroll: PayrollSettings,
}

fn validate_rate(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || *val > Decimal::ONE {
        let mut err = ValidationError::new("range");
        err.message = Some("O percentual deve estar entre 0 e 1.".into());
        return Err(err);
    }
    Ok(())
}

/// Atualização parcial. Campos ausentes ficam como estão.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[validate(length(min = 1, message = "O nome do app não pode ficar vazio."))]
    pub app_name: Option<String>,
    // ausente = mantém, null = remove, string = troca
    #[serde(default, deserialize_with = "deserialize_some")]
    pub logo_data: Option<Option<String>>,

    pub salary_slip_title: Option<String>,
    pub basic_salary_label: Option<String>,
    pub allowances_label: Option<String>,
    pub deductions_label: Option<String>,
    pub net_salary_label: Option<String>,

    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub company_email: Option<String>,
    pub company_website: Option<String>,
    pub company_tax_id: Option<String>,

    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub footer_text: Option<String>,

    #[serde(default, with = "hhmm::option")]
    pub work_start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option")]
    pub work_end_time: Option<NaiveTime>,
    pub late_grace_minutes: Option<u32>,
    pub working_days: Option<Vec<Weekday>>,

    #[validate(custom(function = "validate_rate"))]
    pub allowance_rate: Option<Decimal>,
    #[validate(custom(function = "validate_rate"))]
    pub deduction_rate: Option<Decimal>,
    pub currency_symbol: Option<String>,
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl Settings {
    /// Funde o patch num novo objeto; `self` não é alterado.
    pub fn merged(&self, patch: SettingsPatch) -> Settings {
        let mut next = self.clone();

        set(&mut next.app.app_name, patch.app_name);
        set(&mut next.app.logo_data, patch.logo_data);

        let labels = &mut next.app.salary_slip_labels;
        set(&mut labels.title, patch.salary_slip_title);
        set(&mut labels.basic_salary, patch.basic_salary_label);
        set(&mut labels.allowances, patch.allowances_label);
        set(&mut labels.deductions, patch.deductions_label);
        set(&mut labels.net_salary, patch.net_salary_label);

        let company = &mut next.company;
        set(&mut company.name, patch.company_name);
        set(&mut company.address, patch.company_address);
        set(&mut company.phone, patch.company_phone);
        set(&mut company.email, patch.company_email);
        set(&mut company.website, patch.company_website);
        set(&mut company.tax_id, patch.company_tax_id);

        let branding = &mut next.branding;
        set(&mut branding.primary_color, patch.primary_color);
        set(&mut branding.secondary_color, patch.secondary_color);
        set(&mut branding.footer_text, patch.footer_text);

        let hours = &mut next.working_hours;
        set(&mut hours.start_time, patch.work_start_time);
        set(&mut hours.end_time, patch.work_end_time);
        set(&mut hours.late_grace_minutes, patch.late_grace_minutes);
        set(&mut hours.working_days, patch.working_days);

        let payroll = &mut next.payroll;
        set(&mut payroll.allowance_rate, patch.allowance_rate);
        set(&mut payroll.deduction_rate, patch.deduction_rate);
        set(&mut payroll.currency_symbol, patch.currency_symbol);

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_patch_distinguishes_absent_from_null() {
        let absent: SettingsPatch = serde_json::from_str(r#"{"appName":"Acme"}"#).unwrap();
        assert_eq!(absent.logo_data, None);

        let cleared: SettingsPatch = serde_json::from_str(r#"{"logoData":null}"#).unwrap();
        assert_eq!(cleared.logo_data, Some(None));

        let set: SettingsPatch =
            serde_json::from_str(r#"{"logoData":"data:image/png;base64,AA=="}"#).unwrap();
        assert_eq!(set.logo_data, Some(Some("data:image/png;base64,AA==".to_string())));
    }

    #[test]
    fn merge_touches_only_patched_fields() {
        let base = Settings::default();
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"companyName":"Acme Ltd","workStartTime":"08:30"}"#).unwrap();
        let next = base.merged(patch);

        assert_eq!(next.company.name, "Acme Ltd");
        assert_eq!(next.working_hours.start_time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(next.app, base.app);
        assert_eq!(next.payroll, base.payroll);
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let hours: WorkingHoursSettings = serde_json::from_str(r#"{"lateGraceMinutes":5}"#).unwrap();
        assert_eq!(hours.late_grace_minutes, 5);
        assert_eq!(hours.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(hours.working_days.len(), 5);
    }

    #[test]
    fn late_means_after_grace_period() {
        let hours = WorkingHoursSettings::default();
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert!(!hours.is_late(t(8, 0)));
        assert!(!hours.is_late(t(9, 15)));
        assert!(hours.is_late(t(9, 16)));
    }

    #[test]
    fn grace_period_past_midnight_never_marks_late() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        let night = WorkingHoursSettings {
            start_time: t(23, 50),
            late_grace_minutes: 15,
            ..Default::default()
        };
        assert!(!night.is_late(t(8, 0)));
        assert!(!night.is_late(t(23, 59)));

        let huge = WorkingHoursSettings {
            late_grace_minutes: u32::MAX,
            ..Default::default()
        };
        assert!(!huge.is_late(t(23, 59)));

        let edge = WorkingHoursSettings {
            start_time: t(23, 30),
            late_grace_minutes: 15,
            ..Default::default()
        };
        assert!(!edge.is_late(t(23, 45)));
        assert!(edge.is_late(t(23, 46)));
    }

    #[test]
    fn rates_must_be_fractions() {
        let patch = SettingsPatch {
            allowance_rate: Some(Decimal::from(2)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = SettingsPatch {
            deduction_rate: Some(Decimal::new(8, 2)),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }
}
