//! Demo: two points, one parcel walked from Lima to Tarapoto.

use chrono::Utc;
use encomienda_tracking::model::{
    Contact, Operator, ParcelRegistration, PointCreate, PointKind, RetrievalProof,
};
use encomienda_tracking::runtime::{setup_tracing, TrackingConfig, TrackingSystem};
use encomienda_tracking::tracking::{AdvanceRequest, CodeSource};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = TrackingConfig::load();
    setup_tracing(&config.logging);

    info!("Starting encomienda tracking demo");
    let system = TrackingSystem::new(&config);

    let lima = system
        .points
        .add_point(PointCreate {
            name: "Terminal Lima".to_string(),
            city: "Lima".to_string(),
            kind: PointKind::Terminal,
        })
        .await
        .map_err(|e| e.to_string())?;
    let tarapoto = system
        .points
        .add_point(PointCreate {
            name: "Agencia Tarapoto".to_string(),
            city: "Tarapoto".to_string(),
            kind: PointKind::Agency,
        })
        .await
        .map_err(|e| e.to_string())?;

    let parcel_id = system
        .parcel_store
        .register(ParcelRegistration {
            tracking_code: "ENC-2025-0001".to_string(),
            origin: lima,
            destination: tarapoto,
            description: "Caja con repuestos".to_string(),
            weight_kg: 7.5,
            sender: Contact::new("Rosa Quispe", "987654321"),
            recipient: Contact::new("Luis Pinedo", "912345678"),
            registered_at: Utc::now(),
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(%parcel_id, "Parcel registered");

    let at_lima = Operator::at_point("op-lima", lima);
    let at_tarapoto = Operator::at_point("op-tarapoto", tarapoto);

    let span = tracing::info_span!("warehouse_flow");
    async {
        // A scanned QR code arrives in lower case with stray whitespace.
        let summary = system
            .service
            .lookup(CodeSource::Scanned, " enc-2025-0001\n")
            .await
            .map_err(|e| e.to_string())?;
        info!(code = %summary.tracking_code, state = %summary.state, "Scanned");

        for (operator, note) in [
            (&at_lima, "Recibido en almacén"),
            (&at_lima, "Salida bus 14:30"),
            (&at_tarapoto, "Descargado en agencia"),
        ] {
            system
                .service
                .advance(parcel_id, operator, AdvanceRequest::new().with_note(note))
                .await
                .map_err(|e| e.to_string())?;
        }

        let proof = RetrievalProof::new("DNI 44556677");
        match system
            .service
            .advance(parcel_id, &at_lima, AdvanceRequest::new().with_proof(proof.clone()))
            .await
        {
            Ok(_) => return Err("handover from the origin point was accepted".to_string()),
            Err(e) => warn!(error = %e, "Handover refused as expected"),
        }

        system
            .service
            .advance(parcel_id, &at_tarapoto, AdvanceRequest::new().with_proof(proof))
            .await
            .map_err(|e| e.to_string())?;
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    let view = system
        .service
        .track("ENC-2025-0001")
        .await
        .map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&view).map_err(|e| e.to_string())?;
    println!("{json}");

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
