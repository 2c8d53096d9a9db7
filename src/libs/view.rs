use super::job::Job;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn jobs(jobs: &[Job]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "CLIENT", "ADDRESS", "TIME", "DURATION", "MATERIALS"]);
        for job in jobs {
            let short_id = job.id.simple().to_string();
            table.add_row(row![
                &short_id[..8],
                job.display_date(),
                job.client_name,
                job.address,
                format!("{} - {}", job.time_in, job.time_out),
                job.duration(),
                if job.has_materials() { "yes" } else { "-" }
            ]);
        }
        table.printstd();
    }
}
