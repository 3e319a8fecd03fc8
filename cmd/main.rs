use clap::{Parser, Subcommand};
use log::{error, info};

use udns_record::error::{Error, Result};
use udns_record::provider::UdnsClient;
use udns_record::record::parse_id;
use udns_record::resource::schema::ATTR_TYPE;
use udns_record::resource::{Change, RecordResource, ResourceData, plan};

mod config;

#[derive(Parser)]
#[clap(about = "Manage UltraDNS record sets declared in a YAML file")]
struct Args {
    #[clap(short, long)]
    config: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create, update or replace the declared records
    Apply,
    /// Read the remote state of the declared records
    Refresh,
    /// Delete the declared records
    Destroy,
    /// Import an existing record set by id (`name.zone`) or by explicit fields
    Import {
        id: Option<String>,

        #[clap(long = "type")]
        rr_type: String,

        #[clap(long, requires = "zone")]
        name: Option<String>,

        #[clap(long, requires = "name")]
        zone: Option<String>,
    },
    /// Split an id into name and zone without contacting the API
    ParseId { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let Args { config, command } = args;

    let states = match command {
        Command::ParseId { id } => {
            let (name, zone) = parse_id(&id)?.into_parts();
            println!("name: {}\nzone: {}", name, zone);
            return Ok(());
        }
        Command::Apply => {
            let (client, desired) = load(config.as_deref())?;
            apply(&RecordResource::new(&client), desired).await?
        }
        Command::Refresh => {
            let (client, desired) = load(config.as_deref())?;
            refresh(&RecordResource::new(&client), desired).await?
        }
        Command::Destroy => {
            let (client, desired) = load(config.as_deref())?;
            destroy(&RecordResource::new(&client), desired).await?
        }
        Command::Import {
            id,
            rr_type,
            name,
            zone,
        } => {
            let (client, _) = load(config.as_deref())?;
            vec![import(&RecordResource::new(&client), id, rr_type, name, zone).await?]
        }
    };

    println!("{}", serde_yaml::to_string(&states)?);
    Ok(())
}

/// Builds the API client and the declared record states from the config.
fn load(path: Option<&str>) -> Result<(UdnsClient, Vec<ResourceData>)> {
    let cfg = match path {
        Some(path) => config::Parser::parse_yaml(path)?,
        None => config::Cfg::default(),
    };

    let client = UdnsClient::new(&cfg.provider.with_env())?;
    let desired = cfg
        .records
        .into_iter()
        .map(|r| r.into_resource_data())
        .collect();

    Ok((client, desired))
}

async fn apply(
    resource: &RecordResource<'_>,
    desired: Vec<ResourceData>,
) -> Result<Vec<ResourceData>> {
    let mut states = Vec::new();

    // Without saved state the remote record is looked up under the declared
    // zone, name and type, so a changed key shows up as a new record and the
    // old one is left in place.
    for mut d in desired {
        let mut current = d.clone();
        resource.read(&mut current).await?;

        match plan(Some(&current), &d) {
            Change::Create => resource.create(&mut d).await?,
            Change::Update => resource.update(&mut d).await?,
            Change::Replace => {
                resource.delete(&mut current).await?;
                resource.create(&mut d).await?;
            }
            Change::NoOp => {
                info!("{} is up to date", current.id());
                d = current;
            }
        }

        states.push(d);
    }

    Ok(states)
}

async fn refresh(
    resource: &RecordResource<'_>,
    desired: Vec<ResourceData>,
) -> Result<Vec<ResourceData>> {
    let mut states = Vec::new();

    for mut d in desired {
        let id = d.id().to_string();
        resource.read(&mut d).await?;
        if d.is_gone() {
            info!("{} is missing remotely", id);
        }
        states.push(d);
    }

    Ok(states)
}

async fn destroy(
    resource: &RecordResource<'_>,
    desired: Vec<ResourceData>,
) -> Result<Vec<ResourceData>> {
    let mut states = Vec::new();

    for mut d in desired {
        let id = d.id().to_string();
        resource.read(&mut d).await?;
        if d.is_gone() {
            info!("{} already gone", id);
        } else {
            resource.delete(&mut d).await?;
            info!("{} deleted", id);
        }
        states.push(d);
    }

    Ok(states)
}

async fn import(
    resource: &RecordResource<'_>,
    id: Option<String>,
    rr_type: String,
    name: Option<String>,
    zone: Option<String>,
) -> Result<ResourceData> {
    let mut d = match (id, name, zone) {
        (_, Some(name), Some(zone)) => resource.import_fields(&name, &zone, &rr_type),
        (Some(id), _, _) => {
            let mut d = resource
                .import(ResourceData::with_id(&id))?
                .into_iter()
                .next()
                .ok_or_else(|| Error::Provider(format!("nothing imported for {}", id)))?;
            d.set(ATTR_TYPE, rr_type);
            d
        }
        _ => {
            return Err(Error::InvalidResource(
                "import needs an id or both --name and --zone".to_string(),
            ));
        }
    };

    let id = d.id().to_string();
    resource.read(&mut d).await?;
    if d.is_gone() {
        return Err(Error::Provider(format!(
            "cannot import non-existent remote object {}",
            id
        )));
    }

    Ok(d)
}
